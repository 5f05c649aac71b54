use super::entities::Subject;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
}
