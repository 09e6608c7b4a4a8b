use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use watch_analytics::AlertSubject;
use watch_types::Alert;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Vault,
    Strategy,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AlertSubjectDTO {
    pub kind: SubjectKind,
    pub address: String,
    pub name: String,
    pub alerts: Vec<Alert>,
}

impl AlertSubjectDTO {
    pub fn new(subject: &AlertSubject<'_>, include_dismissed: bool) -> Self {
        let (kind, name) = match subject {
            AlertSubject::Vault(v) => (SubjectKind::Vault, v.name.clone()),
            AlertSubject::Strategy(s) => (SubjectKind::Strategy, s.name.clone()),
        };
        Self {
            kind,
            address: subject.address().to_string(),
            name,
            alerts: subject.visible_alerts(include_dismissed).cloned().collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AlertListDTO {
    pub results: usize,
    pub subjects: Vec<AlertSubjectDTO>,
}
