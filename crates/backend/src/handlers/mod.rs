pub mod a001_category;
pub mod a002_product;
pub mod upload;

use contracts::domain::common::AggregateId;

use crate::shared::error::AppError;

/// Разбор ID из пути; нечисловой или неположительный ID = 400
pub(crate) fn parse_id<T: AggregateId>(raw: &str) -> Result<T, AppError> {
    T::from_string(raw).map_err(AppError::bad_request)
}
