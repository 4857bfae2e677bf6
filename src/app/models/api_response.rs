use serde::Serialize;

/// Success envelope: `{ "success": true, "data": ... }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> From<T> for ApiResponse<T> {
    fn from(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
