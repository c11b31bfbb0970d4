use crate::{
    error::DeskResult,
    reference::{ReferenceData, RestrictedCountry, SanctionedEntity, SanctionsSource},
    tariff::{HsChapter, HsCode, TariffSchedule},
};
use log::info;
use serde::Deserialize;
use std::sync::Arc;

const BUNDLED_SANCTIONS: &str = include_str!("../../data/sanctions/sanctions_list.json");
const BUNDLED_TARIFF: &str = include_str!("../../data/tariff/hs_codes.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SanctionsListFile {
    sources: Vec<SanctionsSource>,
    entities: Vec<SanctionedEntity>,
    restricted_countries: Vec<RestrictedCountry>,
}

#[derive(Debug, Clone, Deserialize)]
struct TariffFile {
    chapters: Vec<HsChapter>,
    codes: Vec<HsCode>,
}

/// All static reference data the desk runs on.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub sanctions: Arc<ReferenceData>,
    pub tariff: Arc<TariffSchedule>,
}

impl DeskConfig {
    /// Reference data compiled into the library.
    pub fn bundled() -> DeskResult<Self> {
        Self::from_json(BUNDLED_SANCTIONS, BUNDLED_TARIFF)
    }

    /// Load from the data/ directory.
    /// In tests, use DeskConfig::bundled() or build ReferenceData directly.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let sanctions_path = format!("{data_dir}/sanctions/sanctions_list.json");
        let sanctions_content = std::fs::read_to_string(&sanctions_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {sanctions_path}: {e}"))?;

        let tariff_path = format!("{data_dir}/tariff/hs_codes.json");
        let tariff_content = std::fs::read_to_string(&tariff_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {tariff_path}: {e}"))?;

        let config = Self::from_json(&sanctions_content, &tariff_content)
            .map_err(|e| anyhow::anyhow!("Invalid reference data in {data_dir}: {e}"))?;
        Ok(config)
    }

    fn from_json(sanctions_json: &str, tariff_json: &str) -> DeskResult<Self> {
        let sanctions_file: SanctionsListFile = serde_json::from_str(sanctions_json)?;
        let sanctions = ReferenceData::new(
            sanctions_file.sources,
            sanctions_file.entities,
            sanctions_file.restricted_countries,
        )?;

        let tariff_file: TariffFile = serde_json::from_str(tariff_json)?;
        let tariff = TariffSchedule::new(tariff_file.chapters, tariff_file.codes)?;

        info!(
            "Loaded reference data: {} sanctioned entities, {} restricted countries, {} HS codes",
            sanctions.entities().len(),
            sanctions.restricted_countries().len(),
            tariff.codes().len()
        );

        Ok(Self {
            sanctions: Arc::new(sanctions),
            tariff: Arc::new(tariff),
        })
    }
}
