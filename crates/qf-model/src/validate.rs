//! Model validation logic.

use crate::schema::{CenterDef, LoadDependentServiceDef, ModelDef};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_model(model: &ModelDef) -> Result<(), ValidationError> {
    if model.version == 0 || model.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: model.version,
        });
    }

    non_negative("think_time", model.think_time)?;

    let mut ids = HashSet::new();
    for center in &model.centers {
        if !ids.insert(center.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: center.id.clone(),
                context: "centers".to_string(),
            });
        }
        validate_center(center)?;
    }

    let ld = &model.load_dependent;
    if !ids.insert(ld.id.as_str()) {
        return Err(ValidationError::DuplicateId {
            id: ld.id.clone(),
            context: "load_dependent".to_string(),
        });
    }
    if !ld.visits.is_finite() || ld.visits <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("load_dependent '{}' visits", ld.id),
            value: ld.visits.to_string(),
            reason: "must be positive".to_string(),
        });
    }

    match &ld.service {
        LoadDependentServiceDef::Constant { service_time } => {
            non_negative("load_dependent service_time", *service_time)?;
        }
        LoadDependentServiceDef::MultiServer {
            service_time,
            servers,
        } => {
            non_negative("load_dependent service_time", *service_time)?;
            if *servers == 0 {
                return Err(ValidationError::InvalidValue {
                    field: "load_dependent servers".to_string(),
                    value: "0".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        LoadDependentServiceDef::Table { service_times } => {
            if service_times.len() != model.population {
                return Err(ValidationError::InvalidValue {
                    field: "load_dependent service_times".to_string(),
                    value: format!("{} entries", service_times.len()),
                    reason: format!("expected one per request ({})", model.population),
                });
            }
            for (i, s) in service_times.iter().enumerate() {
                non_negative(&format!("load_dependent service_times[{i}]"), *s)?;
            }
        }
    }

    Ok(())
}

fn validate_center(center: &CenterDef) -> Result<(), ValidationError> {
    non_negative(&format!("center '{}' service_time", center.id), center.service_time)?;
    non_negative(&format!("center '{}' visits", center.id), center.visits)?;
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite and non-negative".to_string(),
        });
    }
    Ok(())
}
