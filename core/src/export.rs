//! CSV export of screening results and tariff lines.

use crate::{
    error::{DeskError, DeskResult},
    screening::ScreeningMatch,
    tariff::{HsCode, TariffUnit},
};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchRow<'a> {
    id: u32,
    name: &'a str,
    #[serde(rename = "type")]
    entity_type: &'static str,
    country: &'a str,
    source: &'static str,
    programs: String,
    added_date: String,
    match_type: &'static str,
    confidence: u8,
}

impl<'a> From<&'a ScreeningMatch> for MatchRow<'a> {
    fn from(m: &'a ScreeningMatch) -> Self {
        Self {
            id: m.entity.id,
            name: &m.entity.name,
            entity_type: m.entity.entity_type.as_str(),
            country: m.entity.country.as_deref().unwrap_or_default(),
            source: m.entity.source.as_str(),
            programs: m.entity.programs.join("; "),
            added_date: m.entity.added_date.format("%Y-%m-%d").to_string(),
            match_type: m.match_type.as_str(),
            confidence: m.confidence,
        }
    }
}

#[derive(Serialize)]
struct HsCodeRow<'a> {
    code: &'a str,
    description: &'a str,
    chapter: &'a str,
    #[serde(rename = "dutyUS")]
    duty_us: f64,
    #[serde(rename = "dutyEU")]
    duty_eu: f64,
    #[serde(rename = "dutyChina")]
    duty_china: f64,
    unit: TariffUnit,
}

pub fn write_matches_csv<W: Write>(matches: &[ScreeningMatch], writer: W) -> DeskResult<()> {
    write_rows(matches.iter().map(MatchRow::from), writer)
}

pub fn matches_to_csv(matches: &[ScreeningMatch]) -> DeskResult<String> {
    let mut buf = Vec::new();
    write_matches_csv(matches, &mut buf)?;
    String::from_utf8(buf).map_err(|e| DeskError::Other(e.into()))
}

pub fn hs_codes_to_csv(codes: &[&HsCode]) -> DeskResult<String> {
    let rows = codes.iter().map(|hs| HsCodeRow {
        code: &hs.code,
        description: &hs.description,
        chapter: &hs.chapter,
        duty_us: hs.duty_us,
        duty_eu: hs.duty_eu,
        duty_china: hs.duty_china,
        unit: hs.unit,
    });
    let mut buf = Vec::new();
    write_rows(rows, &mut buf)?;
    String::from_utf8(buf).map_err(|e| DeskError::Other(e.into()))
}

fn write_rows<R, W>(rows: impl Iterator<Item = R>, writer: W) -> DeskResult<()>
where
    R: Serialize,
    W: Write,
{
    let mut rows = rows.peekable();
    if rows.peek().is_none() {
        return Err(DeskError::NothingToExport);
    }
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
