use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RefreshQuery {
    #[serde(default)]
    pub skip_if_populated: bool,
}
