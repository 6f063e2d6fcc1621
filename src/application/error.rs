use thiserror::Error;

use crate::domain::Cents;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Negative amount rejected by session policy: {0}")]
    NegativeAmount(Cents),

    #[error("Negative quantity rejected by session policy: {0}")]
    NegativeQuantity(i64),

    #[error("Negative unit price rejected by session policy: {0}")]
    NegativePrice(Cents),

    #[error("Adjusting '{code}' by {delta} would drive a quantity below zero")]
    QuantityBelowZero { code: String, delta: i64 },

    #[error("Stock code already exists: {0}")]
    DuplicateCode(String),

    #[error("Stock code not found: {0}")]
    UnknownCode(String),

    #[error("Dataset error: {0}")]
    Dataset(#[from] anyhow::Error),
}
