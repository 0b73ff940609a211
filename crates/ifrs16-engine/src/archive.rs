//! Archived contract version payload.
//!
//! The stored format keeps the Portuguese keys used by the contract
//! registry, so versions written here can be read back by existing
//! consumers and vice versa.

use serde::{Deserialize, Serialize};

use ifrs16_core::types::{Periodicity, ReadjustmentKind};
use ifrs16_core::{ContractInputs, Date};

use crate::aggregator::ComputationResult;
use crate::classifier::ClassifiedEntry;
use crate::error::EngineResult;
use crate::projector::MonthlyCashFlow;

/// One stored cash-flow row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowRow {
    /// Month number.
    #[serde(rename = "mes")]
    pub month: u32,
    /// `MM/YYYY` label.
    #[serde(rename = "data")]
    pub label: String,
    /// Installment.
    #[serde(rename = "parcela")]
    pub installment: f64,
    /// Discount factor.
    #[serde(rename = "fatorDesconto")]
    pub discount_factor: f64,
    /// Present value.
    #[serde(rename = "valorPresente")]
    pub present_value: f64,
}

impl From<&MonthlyCashFlow> for CashFlowRow {
    fn from(flow: &MonthlyCashFlow) -> Self {
        Self {
            month: flow.month,
            label: flow.label.clone(),
            installment: flow.installment,
            discount_factor: flow.discount_factor,
            present_value: flow.present_value,
        }
    }
}

/// One stored amortization row, with the liability split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountingRow {
    /// Month number.
    #[serde(rename = "mes")]
    pub month: u32,
    /// `MM/YYYY` label.
    #[serde(rename = "data")]
    pub label: String,
    /// Opening liability.
    #[serde(rename = "passivoInicial")]
    pub opening_liability: f64,
    /// Interest.
    #[serde(rename = "juros")]
    pub interest: f64,
    /// Payment.
    #[serde(rename = "pagamento")]
    pub payment: f64,
    /// Closing liability.
    #[serde(rename = "passivoFinal")]
    pub closing_liability: f64,
    /// Gross right-of-use asset.
    #[serde(rename = "ativoBruto")]
    pub gross_asset: f64,
    /// Accumulated depreciation.
    #[serde(rename = "deprecAcum")]
    pub accumulated_depreciation: f64,
    /// Net right-of-use asset.
    #[serde(rename = "ativoLiquido")]
    pub net_asset: f64,
    /// Interest expense.
    #[serde(rename = "despJuros")]
    pub interest_expense: f64,
    /// Depreciation expense.
    #[serde(rename = "despDeprec")]
    pub depreciation_expense: f64,
    /// Total expense.
    #[serde(rename = "despTotal")]
    pub total_expense: f64,
    /// Current liability.
    #[serde(rename = "passivoCP")]
    pub current_portion: f64,
    /// Non-current liability.
    #[serde(rename = "passivoLP")]
    pub non_current_portion: f64,
}

impl From<&ClassifiedEntry> for AccountingRow {
    fn from(row: &ClassifiedEntry) -> Self {
        Self {
            month: row.month,
            label: row.label.clone(),
            opening_liability: row.opening_liability,
            interest: row.interest,
            payment: row.payment,
            closing_liability: row.closing_liability,
            gross_asset: row.gross_asset,
            accumulated_depreciation: row.accumulated_depreciation,
            net_asset: row.net_asset,
            interest_expense: row.interest_expense,
            depreciation_expense: row.depreciation_expense,
            total_expense: row.total_expense,
            current_portion: row.current_portion,
            non_current_portion: row.non_current_portion,
        }
    }
}

/// Stored schedule tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResults {
    /// Cash flow.
    #[serde(rename = "fluxoCaixa")]
    pub cash_flow: Vec<CashFlowRow>,
    /// Amortization rows.
    #[serde(rename = "contabilizacao")]
    pub accounting: Vec<AccountingRow>,
    /// Liability split rows.
    #[serde(rename = "cpLp")]
    pub split: Vec<AccountingRow>,
}

/// Persistence payload of one contract version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedVersion {
    /// Start date (ISO).
    #[serde(rename = "data_inicio")]
    pub start_date: Date,
    /// Term in months.
    #[serde(rename = "prazo_meses")]
    pub term_months: u32,
    /// Grace months.
    #[serde(rename = "carencia_meses")]
    pub grace_months: u32,
    /// Initial installment.
    #[serde(rename = "parcela_inicial")]
    pub initial_installment: f64,
    /// Annual discount rate, percent.
    #[serde(rename = "taxa_desconto_anual")]
    pub annual_rate_percent: f64,
    /// Readjustment kind.
    #[serde(rename = "reajuste_tipo", default)]
    pub readjustment_kind: ReadjustmentKind,
    /// Remeasurement cadence of index-linked contracts.
    #[serde(rename = "reajuste_periodicidade", default)]
    pub periodicity: Periodicity,
    /// Readjustment percent; only stored for manual contracts, and the last
    /// applied index value for index-linked ones.
    #[serde(rename = "reajuste_valor", default)]
    pub readjustment_value: Option<f64>,
    /// Readjustment month.
    #[serde(rename = "mes_reajuste")]
    pub readjustment_month: u32,
    /// Stored schedule tables.
    #[serde(rename = "resultados_json")]
    pub results: StoredResults,
    /// Total present value.
    pub total_vp: f64,
    /// Total nominal.
    pub total_nominal: f64,
    /// Present-value adjustment.
    pub avp: f64,
    /// Free-form notes.
    #[serde(rename = "notas", default)]
    pub notes: Option<String>,
}

impl ArchivedVersion {
    /// Builds the payload for a computed result.
    ///
    /// Blank notes are stored as `null`.
    pub fn from_result(result: &ComputationResult, notes: Option<&str>) -> Self {
        let inputs = &result.inputs;
        let split: Vec<AccountingRow> = result.schedule.iter().map(AccountingRow::from).collect();
        let readjustment_value = (!inputs.readjustment_kind.is_index_linked())
            .then_some(inputs.annual_readjustment_percent);

        Self {
            start_date: inputs.start_date,
            term_months: inputs.term_months,
            grace_months: inputs.grace_months,
            initial_installment: inputs.initial_installment,
            annual_rate_percent: inputs.annual_rate_percent,
            readjustment_kind: inputs.readjustment_kind,
            periodicity: Periodicity::default(),
            readjustment_value,
            readjustment_month: inputs.readjustment_month,
            results: StoredResults {
                cash_flow: result.cash_flow.iter().map(CashFlowRow::from).collect(),
                accounting: split.clone(),
                split,
            },
            total_vp: result.totals.total_present_value,
            total_nominal: result.totals.total_nominal,
            avp: result.totals.avp,
            notes: notes
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        }
    }

    /// Sets the remeasurement cadence.
    #[must_use]
    pub fn with_periodicity(mut self, periodicity: Periodicity) -> Self {
        self.periodicity = periodicity;
        self
    }

    /// Contract inputs stored in this version.
    ///
    /// Index-linked versions carry no fixed readjustment percent.
    pub fn inputs(&self) -> ContractInputs {
        let readjustment = if self.readjustment_kind.is_index_linked() {
            0.0
        } else {
            self.readjustment_value.unwrap_or_default()
        };
        ContractInputs::new(self.start_date, self.term_months)
            .with_grace_months(self.grace_months)
            .with_annual_rate(self.annual_rate_percent)
            .with_readjustment(readjustment, self.readjustment_month)
            .with_initial_installment(self.initial_installment)
            .with_readjustment_kind(self.readjustment_kind)
    }

    /// Renders the payload as pretty-printed JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a stored payload.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate;
    use approx::assert_relative_eq;

    fn inputs() -> ContractInputs {
        ContractInputs::new(Date::from_ymd(2025, 2, 1).unwrap(), 6)
            .with_annual_rate(10.0)
            .with_readjustment(3.0, 2)
            .with_initial_installment(1_000.0)
    }

    #[test]
    fn test_payload_keys() {
        let result = calculate(&inputs()).unwrap();
        let version = ArchivedVersion::from_result(&result, Some("first version"));
        let json: serde_json::Value = serde_json::to_value(&version).unwrap();

        assert_eq!(json["data_inicio"], "2025-02-01");
        assert_eq!(json["prazo_meses"], 6);
        assert_eq!(json["reajuste_tipo"], "manual");
        assert_eq!(json["reajuste_periodicidade"], "anual");
        assert_eq!(json["reajuste_valor"], 3.0);
        assert_eq!(json["notas"], "first version");

        let stored = &json["resultados_json"];
        assert_eq!(stored["fluxoCaixa"].as_array().unwrap().len(), 6);
        assert_eq!(stored["contabilizacao"].as_array().unwrap().len(), 7);
        assert_eq!(stored["cpLp"][0]["mes"], 0);
        assert!(stored["cpLp"][0].get("passivoCP").is_some());
        assert!(stored["fluxoCaixa"][0].get("fatorDesconto").is_some());
    }

    #[test]
    fn test_index_linked_has_no_readjustment_value() {
        let inputs = inputs().with_readjustment_kind(ReadjustmentKind::Ipca);
        let result = calculate(&inputs).unwrap();
        let version = ArchivedVersion::from_result(&result, Some("  "));
        assert_eq!(version.readjustment_value, None);
        assert_eq!(version.notes, None);

        let json = version.to_json().unwrap();
        assert!(json.contains("\"reajuste_valor\": null"));
        assert_relative_eq!(version.inputs().annual_readjustment_percent, 0.0);
    }

    #[test]
    fn test_inputs_reload() {
        let result = calculate(&inputs()).unwrap();
        let version = ArchivedVersion::from_result(&result, None);
        let reloaded = ArchivedVersion::from_json(&version.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.inputs(), inputs());
        assert_relative_eq!(reloaded.total_vp, result.totals.total_present_value);
    }

    #[test]
    fn test_missing_periodicity_defaults_to_annual() {
        let result = calculate(&inputs()).unwrap();
        let mut json = serde_json::to_value(ArchivedVersion::from_result(&result, None)).unwrap();
        json.as_object_mut().unwrap().remove("reajuste_periodicidade");
        let version: ArchivedVersion = serde_json::from_value(json).unwrap();
        assert_eq!(version.periodicity, Periodicity::Annual);
    }
}
