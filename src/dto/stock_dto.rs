use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::validate_not_empty;

// Request de cambio de status en lote
#[derive(Debug, Deserialize, Validate)]
pub struct BulkStatusRequest {
    #[validate(length(min = 1, max = 10000))]
    pub entry_ids: Vec<String>,
    #[validate(custom = "validate_not_empty")]
    pub status: String,
}

// Request de reasignación de container; `null` deja la entrada sin container
#[derive(Debug, Deserialize)]
pub struct ContainerAssignmentRequest {
    pub container_id: Option<String>,
}

// Respuesta de reasignación
#[derive(Debug, Serialize)]
pub struct ContainerAssignmentResponse {
    pub entry_id: String,
    pub container_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bulk_request_requires_ids() {
        let request: BulkStatusRequest =
            serde_json::from_value(json!({ "entry_ids": [], "status": "Novo" })).unwrap();
        assert!(request.validate().is_err());

        let request: BulkStatusRequest =
            serde_json::from_value(json!({ "entry_ids": ["1"], "status": " " })).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_container_request_accepts_null() {
        let request: ContainerAssignmentRequest =
            serde_json::from_value(json!({ "container_id": null })).unwrap();
        assert!(request.container_id.is_none());
    }
}
