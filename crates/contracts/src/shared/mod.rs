pub mod api_response;
pub mod pagination;
pub mod upload;
pub mod validation;

pub use api_response::ApiResponse;
pub use pagination::{Page, PaginationInfo};
pub use upload::UploadedFile;
pub use validation::{ValidationErrors, ValidationRules};
