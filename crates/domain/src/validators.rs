/// Accepts a plain SQL identifier, optionally schema-qualified once
/// (`schema.view`). Each part must match `[A-Za-z_][A-Za-z0-9_]*` and be at
/// most 63 bytes, the Postgres identifier limit.
pub fn validate_view_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("view name cannot be empty".to_string());
    }

    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 {
        return Err(format!("view name '{name}' has more than one schema qualifier"));
    }

    for part in parts {
        if part.is_empty() || part.len() > 63 {
            return Err(format!(
                "view name '{name}' has an empty or over-long identifier"
            ));
        }
        let mut chars = part.chars();
        let first_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !first_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("view name '{name}' is not a valid SQL identifier"));
        }
    }

    Ok(())
}

pub fn validate_url(url: &str) -> Result<(), String> {
    if url.len() > 2048 {
        return Err("URL cannot exceed 2048 characters".to_string());
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }
    Ok(())
}
