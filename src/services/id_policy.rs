// src/services/id_policy.rs

use crate::common::error::AppError;

// Quantas vezes o create pede um novo ID quando o insert esbarra num ID já gravado.
pub const MAX_ID_ATTEMPTS: u32 = 5;

/// Próximo ID a partir da marca d'água (maior ID já entregue, gravado ou não).
/// A marca nunca desce, então um ID excluído não volta a ser usado.
pub fn next_id(high_water: Option<i64>) -> Result<i64, AppError> {
    match high_water {
        None => Ok(1),
        Some(last) => last.checked_add(1).ok_or(AppError::IdSequenceExhausted),
    }
}
