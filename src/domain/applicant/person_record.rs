//! The canonical applicant record for a UK Certificate of Sponsorship form.
//!
//! Every record emitted by the pipeline carries all fields of the form
//! schema in a fixed key order, with empty strings for anything the source
//! documents did not provide. A handful of fields are business policy, not
//! extracted facts, and are force-set after every merge.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical field order of the CoS form. This is the JSON key order of
/// every emitted record; the merge step re-emits all of these even when the
/// LLM omitted them.
pub const FIELD_ORDER: [&str; 50] = [
    "familyName",
    "givenName",
    "otherNames",
    "nationality",
    "placeOfBirth",
    "countryOfBirth",
    "birthDay",
    "birthMonth",
    "birthYear",
    "sex",
    "countryOfResidence",
    "passportNumber",
    "passportIssueDay",
    "passportIssueMonth",
    "passportIssueYear",
    "passportExpiryDay",
    "passportExpiryMonth",
    "passportExpiryYear",
    "placeOfIssueOfPassport",
    "address",
    "addressLine2",
    "addressLine3",
    "city",
    "county",
    "postcode",
    "country",
    "ukIdCardNumber",
    "ukNationalInsuranceNumber",
    "nationalIdCardNumber",
    "employeeNumber",
    "showDateStartDay",
    "showDateStartMonth",
    "showDateStartYear",
    "showDateEndDay",
    "showDateEndMonth",
    "showDateEndYear",
    "doesMigrantNeedToLeaveAndReenter",
    "totalWeeklyHours",
    "addPWSAddress",
    "addWSAddress",
    "jobTitle",
    "jobType",
    "summaryOfJobDescription",
    "forEach",
    "grossSalary",
    "grossAllowances",
    "allowanceDetails",
    "creativeCodeCompliance",
    "certifyMaintenance",
    "venueAddress",
];

/// Fixed business-policy values, independent of document content.
pub const JOB_TITLE: &str = "Touring DJ";
pub const JOB_TYPE: &str = "X3145";
pub const CREATIVE_CODE_COMPLIANCE: &str = "Creative Sector - Live Music - No Code of Conduct";

/// Email provenance attached during extraction. Must survive the merge
/// step unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(rename = "sourceEmailId", skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(rename = "sourceEmailSubject", skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    #[serde(rename = "sourceEmailFrom", skip_serializing_if = "Option::is_none")]
    pub email_from: Option<String>,
}

impl Provenance {
    /// True when no provenance field is set.
    pub fn is_empty(&self) -> bool {
        self.email_id.is_none() && self.email_subject.is_none() && self.email_from.is_none()
    }
}

/// One visa-sponsorship applicant. Field declaration order matches
/// [`FIELD_ORDER`], which fixes the serialized key order. Deserialization
/// accepts partial objects - absent fields become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonRecord {
    pub family_name: String,
    pub given_name: String,
    pub other_names: String,
    pub nationality: String,
    pub place_of_birth: String,
    pub country_of_birth: String,
    pub birth_day: String,
    pub birth_month: String,
    pub birth_year: String,
    pub sex: String,
    pub country_of_residence: String,
    pub passport_number: String,
    pub passport_issue_day: String,
    pub passport_issue_month: String,
    pub passport_issue_year: String,
    pub passport_expiry_day: String,
    pub passport_expiry_month: String,
    pub passport_expiry_year: String,
    pub place_of_issue_of_passport: String,
    pub address: String,
    pub address_line2: String,
    pub address_line3: String,
    pub city: String,
    pub county: String,
    pub postcode: String,
    pub country: String,
    pub uk_id_card_number: String,
    pub uk_national_insurance_number: String,
    pub national_id_card_number: String,
    pub employee_number: String,
    pub show_date_start_day: String,
    pub show_date_start_month: String,
    pub show_date_start_year: String,
    pub show_date_end_day: String,
    pub show_date_end_month: String,
    pub show_date_end_year: String,
    pub does_migrant_need_to_leave_and_reenter: String,
    pub total_weekly_hours: String,
    #[serde(rename = "addPWSAddress")]
    pub add_pws_address: String,
    #[serde(rename = "addWSAddress")]
    pub add_ws_address: String,
    pub job_title: String,
    pub job_type: String,
    pub summary_of_job_description: String,
    pub for_each: String,
    pub gross_salary: String,
    pub gross_allowances: String,
    pub allowance_details: String,
    pub creative_code_compliance: String,
    pub certify_maintenance: String,
    pub venue_address: String,
    #[serde(flatten, default)]
    pub provenance: Provenance,
}

impl PersonRecord {
    /// A record with every schema field present as an empty string.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Canonicalizes arbitrary LLM output into a full record: every field
    /// of [`FIELD_ORDER`] is present (missing keys default to ""), JSON
    /// numbers are coerced to their decimal rendering, and any provenance
    /// keys on the object are carried over.
    pub fn from_llm_value(value: &Value) -> Self {
        let source = value.as_object().cloned().unwrap_or_default();
        let mut canonical = Map::with_capacity(FIELD_ORDER.len() + 3);
        for key in FIELD_ORDER {
            canonical.insert(key.to_string(), Value::String(coerce_field(source.get(key))));
        }
        for key in ["sourceEmailId", "sourceEmailSubject", "sourceEmailFrom"] {
            if let Some(v) = source.get(key).filter(|v| !v.is_null()) {
                canonical.insert(key.to_string(), Value::String(coerce_field(Some(v))));
            }
        }
        // All 50 schema keys are present as strings, so this cannot fail.
        serde_json::from_value(Value::Object(canonical)).unwrap_or_default()
    }

    /// Force-sets the business-policy fields regardless of what the LLM
    /// produced. The job summary is rebuilt from countryOfBirth.
    pub fn apply_policy_constants(&mut self) {
        self.does_migrant_need_to_leave_and_reenter = "Y".to_string();
        self.total_weekly_hours = "2".to_string();
        self.add_pws_address = String::new();
        self.add_ws_address = String::new();
        self.job_title = JOB_TITLE.to_string();
        self.job_type = JOB_TYPE.to_string();
        self.summary_of_job_description = job_summary(&self.country_of_birth);
        self.for_each = "PERF".to_string();
        self.gross_allowances = String::new();
        self.allowance_details = String::new();
        self.creative_code_compliance = CREATIVE_CODE_COMPLIANCE.to_string();
        self.certify_maintenance = "Y".to_string();
    }

    /// Sentinel record substituted when per-document extraction fails and
    /// the masking policy applies. Clearly marked with "Unknown" values.
    pub fn placeholder() -> Self {
        let mut record = Self::empty();
        record.family_name = "Unknown".to_string();
        record.given_name = "Artist".to_string();
        record.nationality = "Unknown".to_string();
        record.country_of_birth = "Unknown".to_string();
        record.passport_number = "UNKNOWN123".to_string();
        record.show_date_start_day = "01".to_string();
        record.show_date_start_month = "00".to_string();
        record.show_date_start_year = "2025".to_string();
        record.show_date_end_day = "05".to_string();
        record.show_date_end_month = "00".to_string();
        record.show_date_end_year = "2025".to_string();
        record.gross_salary = "5000".to_string();
        record.venue_address = "Sample Venue Address".to_string();
        record.does_migrant_need_to_leave_and_reenter = "Y".to_string();
        record.total_weekly_hours = "2".to_string();
        record.job_title = JOB_TITLE.to_string();
        record.job_type = JOB_TYPE.to_string();
        record.summary_of_job_description =
            "Internationally renowned touring DJ performing in the UK as part of international tour. No impact on resident labor."
                .to_string();
        record.for_each = "PERF".to_string();
        record.creative_code_compliance = CREATIVE_CODE_COMPLIANCE.to_string();
        record.certify_maintenance = "Y".to_string();
        record
    }

    /// True when all six show-date fields and the venue address are
    /// populated. Such a record is the authoritative itinerary source
    /// during cross-person consistency repair.
    pub fn has_complete_itinerary(&self) -> bool {
        !self.show_date_start_day.is_empty()
            && !self.show_date_start_month.is_empty()
            && !self.show_date_start_year.is_empty()
            && !self.show_date_end_day.is_empty()
            && !self.show_date_end_month.is_empty()
            && !self.show_date_end_year.is_empty()
            && !self.venue_address.trim().is_empty()
    }

    /// Copies show dates, venue, and (when set) salary from the
    /// authoritative itinerary record.
    pub fn adopt_itinerary(&mut self, itinerary: &PersonRecord) {
        self.show_date_start_day = itinerary.show_date_start_day.clone();
        self.show_date_start_month = itinerary.show_date_start_month.clone();
        self.show_date_start_year = itinerary.show_date_start_year.clone();
        self.show_date_end_day = itinerary.show_date_end_day.clone();
        self.show_date_end_month = itinerary.show_date_end_month.clone();
        self.show_date_end_year = itinerary.show_date_end_year.clone();
        self.venue_address = itinerary.venue_address.clone();
        if !itinerary.gross_salary.trim().is_empty() {
            self.gross_salary = itinerary.gross_salary.clone();
        }
    }

    /// "Given Family", trimmed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
            .trim()
            .to_string()
    }
}

/// The templated job summary, parameterized by country of birth.
pub fn job_summary(country_of_birth: &str) -> String {
    format!(
        "Internationally renowned touring DJ from {} performing in the UK as part of international tour. No impact on resident labor.",
        country_of_birth
    )
}

/// String fields come back from the LLM as strings most of the time, but
/// salaries and date parts occasionally arrive as JSON numbers.
fn coerce_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
