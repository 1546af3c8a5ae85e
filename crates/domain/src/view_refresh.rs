use crate::validators::validate_view_name;
use crate::DomainError;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A backing aggregate view that reports query against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaterializedView {
    pub name: Arc<str>,
}

impl MaterializedView {
    pub fn new(name: &str) -> Result<Self, DomainError> {
        validate_view_name(name).map_err(DomainError::InvalidViewName)?;
        Ok(Self {
            name: Arc::from(name),
        })
    }
}

/// Ordered list of views refreshed by every refresh cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCatalog {
    views: Vec<MaterializedView>,
}

impl ViewCatalog {
    pub fn new<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut views = Vec::new();
        for name in names {
            let view = MaterializedView::new(name.as_ref())?;
            if !seen.insert(Arc::clone(&view.name)) {
                return Err(DomainError::InvalidViewName(format!(
                    "view '{}' is listed more than once",
                    view.name
                )));
            }
            views.push(view);
        }
        Ok(Self { views })
    }

    pub fn views(&self) -> &[MaterializedView] {
        &self.views
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Fresh tasks for one refresh cycle, in catalog order.
    pub fn tasks(&self) -> impl Iterator<Item = ViewRefreshTask> + '_ {
        self.views.iter().map(|v| ViewRefreshTask {
            view_name: Arc::clone(&v.name),
        })
    }
}

/// Unit of work handed to exactly one refresh worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRefreshTask {
    pub view_name: Arc<str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshMode {
    ConcurrentSucceeded,
    FallbackSucceeded,
    Failed,
    Skipped,
}

impl RefreshMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshMode::ConcurrentSucceeded => "concurrent",
            RefreshMode::FallbackSucceeded => "fallback",
            RefreshMode::Failed => "failed",
            RefreshMode::Skipped => "skipped",
        }
    }

    /// Terminal states that produce a timing observation.
    pub fn is_refreshed(&self) -> bool {
        matches!(
            self,
            RefreshMode::ConcurrentSucceeded | RefreshMode::FallbackSucceeded
        )
    }
}

impl fmt::Display for RefreshMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub view_name: Arc<str>,
    pub duration_ms: u64,
    pub mode: RefreshMode,
    pub error: Option<DomainError>,
}

impl RefreshOutcome {
    pub fn skipped(view_name: Arc<str>) -> Self {
        Self {
            view_name,
            duration_ms: 0,
            mode: RefreshMode::Skipped,
            error: None,
        }
    }
}

/// Everything one refresh cycle did, in completion order.
#[derive(Debug, Clone, Default)]
pub struct RefreshCycleReport {
    pub outcomes: Vec<RefreshOutcome>,
    pub elapsed_ms: u64,
}

impl RefreshCycleReport {
    pub fn count(&self, mode: RefreshMode) -> usize {
        self.outcomes.iter().filter(|o| o.mode == mode).count()
    }

    pub fn outcome_for(&self, view_name: &str) -> Option<&RefreshOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.view_name.as_ref() == view_name)
    }
}
