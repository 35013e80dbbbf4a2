use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct PaymentDto {
    pub card_number: String,
    /// `MM/YY`
    pub expiry_date: String,
    pub cvv: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct PaymentResultDto {
    pub success: bool,
    pub message: String,
}
