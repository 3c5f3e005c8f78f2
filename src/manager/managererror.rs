use serde::Deserialize;
use thiserror::Error;

use crate::math::spline::knotvector::KnotVectorError;

/// # 變更說明
/// 改用 `thiserror` derive，取代手寫的 `Display` 與 `to_string()`：
/// - `#[from]` 讓 `?` operator 直接把 IO / JSON 錯誤收進來。
/// - `std::error::Error` 的 `source()` 自動保留錯誤鏈。
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("{0}")]
    IOError(#[from] std::io::Error),
    #[error("{0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("key '{0}' not found")]
    NameNotFoundError(String),
    #[error("{0}")]
    KnotVectorError(#[from] KnotVectorError),
}

impl ManagerError {
    pub fn from_json_or_json_parse_error<T>(json_value: serde_json::Value) -> Result<T, Self>
    where
        T: for<'a> Deserialize<'a>,
    {
        serde_json::from_value(json_value).map_err(ManagerError::JsonParseError)
    }
}
