use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Трейт для типов идентификаторов агрегатов
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Преобразовать ID в строку
    fn as_string(&self) -> String;

    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}

impl AggregateId for i64 {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map_err(|e| format!("Invalid id '{}': {}", s, e))
    }
}

/// Разбор положительного целочисленного идентификатора (общий для всех ID каталога)
pub fn parse_positive_id(s: &str) -> Result<i64, String> {
    let value = i64::from_string(s)?;
    if value <= 0 {
        return Err(format!("Invalid id '{}': must be a positive integer", s));
    }
    Ok(value)
}
