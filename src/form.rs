//! Form state holder for the five house attributes

use crate::types::PredictRequest;

/// Input fields in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Lb,
    Lt,
    Kt,
    Km,
    Grs,
}

impl Field {
    pub const ALL: [Field; 5] = [Field::Lb, Field::Lt, Field::Kt, Field::Km, Field::Grs];

    /// JSON key sent to the prediction endpoint
    pub fn key(self) -> &'static str {
        match self {
            Field::Lb => "LB",
            Field::Lt => "LT",
            Field::Kt => "KT",
            Field::Km => "KM",
            Field::Grs => "GRS",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Lb => "Luas bangunan (LB)",
            Field::Lt => "Luas tanah (LT)",
            Field::Kt => "Jumlah kamar tidur (KT)",
            Field::Km => "Jumlah kamar mandi (KM)",
            Field::Grs => "Garasi (0/1/2)",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Field::Lb | Field::Lt => "m²",
            Field::Kt | Field::Km => "jumlah",
            Field::Grs => "0 / 1 / 2",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Raised before any request is sent when a field is empty or not a number
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field {} is empty or not a valid number", .field.key())]
pub struct ValidationError {
    pub field: Field,
}

/// Raw field values exactly as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    values: [String; 5],
}

impl Default for FormRecord {
    fn default() -> Self {
        let mut values: [String; 5] = Default::default();
        values[Field::Grs.index()] = "0".to_string();
        Self { values }
    }
}

impl FormRecord {
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Replace one field, leaving the others untouched
    pub fn update(&mut self, field: Field, raw: impl Into<String>) {
        self.values[field.index()] = raw.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Check every field in wire order and build the request from the raw strings.
    pub fn validate(&self) -> Result<PredictRequest, ValidationError> {
        for field in Field::ALL {
            if !is_valid_number(self.get(field)) {
                return Err(ValidationError { field });
            }
        }
        Ok(PredictRequest {
            lb: self.get(Field::Lb).to_string(),
            lt: self.get(Field::Lt).to_string(),
            kt: self.get(Field::Kt).to_string(),
            km: self.get(Field::Km).to_string(),
            grs: self.get(Field::Grs).to_string(),
        })
    }
}

fn is_valid_number(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    matches!(trimmed.parse::<f64>(), Ok(v) if v.is_finite() && v >= 0.0)
}
