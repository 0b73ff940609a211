//! Input normalization: raw contract fields to [`ContractInputs`].
//!
//! Lenient mode mirrors how contract forms have always been read: a field
//! that is missing, unparsable or zero takes its fallback from the
//! [`FallbackPolicy`](ifrs16_config::FallbackPolicy). Strict mode raises
//! `InvalidInput` for the same conditions, except that an explicit zero is
//! kept (a zero term is then rejected by the engine precondition).

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use ifrs16_config::{ContractField, NormalizationConfig};
use ifrs16_core::{ContractInputs, Date, Ifrs16Error, Ifrs16Result};
use ifrs16_core::types::ReadjustmentKind;

/// Contract fields as received from a form, a file or a stored version.
///
/// Numeric fields accept either numbers or text when deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawContractFields {
    /// Start date, `YYYY-MM-DD`.
    #[serde(default, alias = "data_inicio")]
    pub start_date: String,
    /// Term in months.
    #[serde(default, alias = "prazo_meses", deserialize_with = "number_or_text")]
    pub term_months: Option<String>,
    /// Grace period in months.
    #[serde(default, alias = "carencia_meses", deserialize_with = "number_or_text")]
    pub grace_months: Option<String>,
    /// Annual discount rate, percent.
    #[serde(default, alias = "taxa_desconto_anual", deserialize_with = "number_or_text")]
    pub annual_rate: Option<String>,
    /// Annual readjustment, percent.
    #[serde(default, alias = "reajuste_valor", deserialize_with = "number_or_text")]
    pub annual_readjustment: Option<String>,
    /// Readjustment month, 1-12.
    #[serde(default, alias = "mes_reajuste", deserialize_with = "number_or_text")]
    pub readjustment_month: Option<String>,
    /// Initial installment.
    #[serde(default, alias = "parcela_inicial", deserialize_with = "number_or_text")]
    pub initial_installment: Option<String>,
    /// Readjustment kind code (`manual`, `igpm`, ...).
    #[serde(default, alias = "reajuste_tipo")]
    pub readjustment_kind: Option<String>,
}

fn number_or_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Int(v) => v.to_string(),
        Raw::Float(v) => v.to_string(),
        Raw::Text(v) => v,
    }))
}

impl RawContractFields {
    /// Creates raw fields with only the start date set.
    pub fn new(start_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            ..Self::default()
        }
    }

    /// Sets a numeric field from text.
    #[must_use]
    pub fn with(mut self, field: ContractField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            ContractField::StartDate => {
                self.start_date = value.unwrap_or_default();
            }
            ContractField::TermMonths => self.term_months = value,
            ContractField::GraceMonths => self.grace_months = value,
            ContractField::AnnualRate => self.annual_rate = value,
            ContractField::AnnualReadjustment => self.annual_readjustment = value,
            ContractField::ReadjustmentMonth => self.readjustment_month = value,
            ContractField::InitialInstallment => self.initial_installment = value,
        }
        self
    }

    fn value(&self, field: ContractField) -> Option<&str> {
        match field {
            ContractField::StartDate => Some(self.start_date.as_str()),
            ContractField::TermMonths => self.term_months.as_deref(),
            ContractField::GraceMonths => self.grace_months.as_deref(),
            ContractField::AnnualRate => self.annual_rate.as_deref(),
            ContractField::AnnualReadjustment => self.annual_readjustment.as_deref(),
            ContractField::ReadjustmentMonth => self.readjustment_month.as_deref(),
            ContractField::InitialInstallment => self.initial_installment.as_deref(),
        }
    }
}

/// A fallback substituted during lenient normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedFallback {
    /// Field that was replaced.
    pub field: ContractField,
    /// Raw value as received (`None` when missing).
    pub raw: Option<String>,
    /// Value used instead.
    pub fallback: f64,
}

/// Normalized inputs together with the fallbacks that were applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedContract {
    /// Typed contract terms.
    pub inputs: ContractInputs,
    /// Fallbacks substituted in lenient mode (always empty in strict mode).
    pub fallbacks: Vec<AppliedFallback>,
}

/// Normalizes raw fields into typed contract inputs.
///
/// # Errors
///
/// - `InvalidDate` if the start date does not parse (both modes)
/// - `InvalidInput` for malformed numeric fields (strict mode)
/// - `InvalidContractTerm` for a negative term
/// - `InvalidReadjustmentMonth` for a month outside 1-12 (strict mode)
pub fn normalize(
    raw: &RawContractFields,
    config: &NormalizationConfig,
) -> Ifrs16Result<ContractInputs> {
    normalize_with_report(raw, config).map(|normalized| normalized.inputs)
}

/// Lenient normalization with the standard fallback table.
pub fn normalize_lenient(raw: &RawContractFields) -> Ifrs16Result<ContractInputs> {
    normalize(raw, &NormalizationConfig::lenient())
}

/// Strict normalization: any malformed field is an error.
pub fn normalize_strict(raw: &RawContractFields) -> Ifrs16Result<ContractInputs> {
    normalize(raw, &NormalizationConfig::strict())
}

/// Like [`normalize`], also reporting which fallbacks were substituted.
pub fn normalize_with_report(
    raw: &RawContractFields,
    config: &NormalizationConfig,
) -> Ifrs16Result<NormalizedContract> {
    let start_date = Date::parse(&raw.start_date)?;
    let mut reader = FieldReader {
        raw,
        config,
        applied: Vec::new(),
    };

    let term = reader.integer(ContractField::TermMonths)?;
    if term < 0 {
        return Err(Ifrs16Error::invalid_contract_term(term));
    }
    let grace = reader.non_negative_integer(ContractField::GraceMonths)?;
    let annual_rate_percent = reader.number(ContractField::AnnualRate)?;
    let annual_readjustment_percent = reader.number(ContractField::AnnualReadjustment)?;
    let readjustment_month = reader.readjustment_month()?;
    let initial_installment = reader.number(ContractField::InitialInstallment)?;

    let readjustment_kind = match raw.readjustment_kind.as_deref().map(str::trim) {
        None | Some("") => ReadjustmentKind::Manual,
        Some(code) => match code.parse() {
            Ok(kind) => kind,
            Err(err) if config.is_strict() => return Err(err),
            Err(_) => {
                warn!(code, "unknown readjustment kind, treating as manual");
                ReadjustmentKind::Manual
            }
        },
    };

    let inputs = ContractInputs {
        start_date,
        term_months: u32::try_from(term)
            .map_err(|_| Ifrs16Error::invalid_contract_term(term))?,
        grace_months: grace,
        annual_rate_percent,
        annual_readjustment_percent,
        readjustment_month,
        initial_installment,
        readjustment_kind,
    };

    debug!(
        mode = %config.mode,
        fallbacks = reader.applied.len(),
        term = inputs.term_months,
        "normalized contract inputs"
    );

    Ok(NormalizedContract {
        inputs,
        fallbacks: reader.applied,
    })
}

struct FieldReader<'a> {
    raw: &'a RawContractFields,
    config: &'a NormalizationConfig,
    applied: Vec<AppliedFallback>,
}

impl FieldReader<'_> {
    /// Parsed value, or `None` when missing, unparsable or non-finite.
    fn parsed(&self, field: ContractField) -> Option<f64> {
        let text = self.raw.value(field)?.trim();
        let value: f64 = text.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(if field.is_integer() { value.trunc() } else { value })
    }

    fn fallback(&mut self, field: ContractField) -> Ifrs16Result<f64> {
        let raw = self.raw.value(field).map(str::to_string);
        if self.config.is_strict() {
            return Err(Ifrs16Error::invalid_input(
                field.key(),
                raw.unwrap_or_default(),
            ));
        }
        let fallback = self
            .config
            .fallbacks
            .fallback(field)
            .unwrap_or_default();
        warn!(field = field.key(), raw = ?raw, fallback, "applying fallback value");
        self.applied.push(AppliedFallback {
            field,
            raw,
            fallback,
        });
        Ok(fallback)
    }

    fn number(&mut self, field: ContractField) -> Ifrs16Result<f64> {
        match self.parsed(field) {
            Some(value) if value != 0.0 || self.config.is_strict() => Ok(value),
            _ => self.fallback(field),
        }
    }

    fn integer(&mut self, field: ContractField) -> Ifrs16Result<i64> {
        Ok(self.number(field)? as i64)
    }

    fn non_negative_integer(&mut self, field: ContractField) -> Ifrs16Result<u32> {
        let value = self.integer(field)?;
        match u32::try_from(value) {
            Ok(value) => Ok(value),
            Err(_) if self.config.is_strict() => {
                Err(Ifrs16Error::invalid_input(field.key(), value.to_string()))
            }
            Err(_) => Ok(self.fallback(field)? as u32),
        }
    }

    fn readjustment_month(&mut self) -> Ifrs16Result<u32> {
        let field = ContractField::ReadjustmentMonth;
        let value = self.integer(field)?;
        match u32::try_from(value) {
            Ok(month) if (1..=12).contains(&month) => Ok(month),
            _ if self.config.is_strict() => Err(Ifrs16Error::InvalidReadjustmentMonth {
                month: u32::try_from(value).unwrap_or(0),
            }),
            _ => Ok(self.fallback(field)? as u32),
        }
    }
}
