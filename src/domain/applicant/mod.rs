//! Applicant records - the canonical CoS form schema.

mod person_record;

pub use person_record::{
    PersonRecord, Provenance, CREATIVE_CODE_COMPLIANCE, FIELD_ORDER, JOB_TITLE, JOB_TYPE,
};
