use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct ViewRowCount {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ViewsReportResponse {
    pub generated_at: String,
    pub views: Vec<ViewRowCount>,
}
