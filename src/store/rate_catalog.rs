//! Rate catalog sources.
//!
//! A [`ConfigLoader`] serves the tables it read from YAML as they are. The
//! [`InMemoryRateCatalog`] starts from such a snapshot and lets the payroll
//! office maintain the tables at runtime.

use std::sync::RwLock;

use crate::config::{
    CappedContributionRate, ConfigLoader, FlatContributionRate, OvertimeBand, RateCatalog,
    TaxBracket,
};
use crate::error::{EngineError, EngineResult};

use super::{RateCatalogSource, read, write};

impl RateCatalogSource for ConfigLoader {
    fn snapshot(&self) -> EngineResult<RateCatalog> {
        Ok(self.rate_catalog().clone())
    }
}

#[derive(Debug)]
struct CatalogTables {
    capped: CappedContributionRate,
    flat: FlatContributionRate,
    brackets: Vec<TaxBracket>,
    bands: Vec<OvertimeBand>,
    next_bracket_id: u64,
}

/// Rate tables that can be edited while the engine runs.
///
/// Tax brackets receive an id when added so they can later be updated or
/// removed; their table order is the order they were added in.
#[derive(Debug)]
pub struct InMemoryRateCatalog {
    tables: RwLock<CatalogTables>,
}

impl InMemoryRateCatalog {
    /// Seeds the catalog from a snapshot, numbering brackets that have no id.
    pub fn from_snapshot(catalog: &RateCatalog) -> Self {
        let mut next_bracket_id = catalog
            .tax_brackets()
            .iter()
            .filter_map(|b| b.id)
            .max()
            .unwrap_or(0);

        let brackets = catalog
            .tax_brackets()
            .iter()
            .cloned()
            .map(|mut b| {
                if b.id.is_none() {
                    next_bracket_id += 1;
                    b.id = Some(next_bracket_id);
                }
                b
            })
            .collect();

        Self {
            tables: RwLock::new(CatalogTables {
                capped: catalog.capped_contribution().clone(),
                flat: catalog.flat_contribution().clone(),
                brackets,
                bands: catalog.overtime_bands().to_vec(),
                next_bracket_id,
            }),
        }
    }

    /// Replaces the capped contribution rate.
    pub fn set_capped_contribution(&self, rate: CappedContributionRate) -> EngineResult<()> {
        write(&self.tables)?.capped = rate;
        tracing::info!("Capped contribution rate updated");
        Ok(())
    }

    /// Replaces the flat contribution rate.
    pub fn set_flat_contribution(&self, rate: FlatContributionRate) -> EngineResult<()> {
        write(&self.tables)?.flat = rate;
        tracing::info!("Flat contribution rate updated");
        Ok(())
    }

    /// Appends a tax bracket and returns it with its assigned id.
    pub fn add_tax_bracket(&self, mut bracket: TaxBracket) -> EngineResult<TaxBracket> {
        if bracket.id.is_some() {
            return Err(EngineError::validation(
                "id",
                "a new tax bracket must not carry an id",
            ));
        }
        let mut tables = write(&self.tables)?;
        tables.next_bracket_id += 1;
        bracket.id = Some(tables.next_bracket_id);
        tables.brackets.push(bracket.clone());
        Ok(bracket)
    }

    /// Replaces the bracket with id `id`, keeping its position in the table.
    pub fn update_tax_bracket(&self, id: u64, mut bracket: TaxBracket) -> EngineResult<TaxBracket> {
        let mut tables = write(&self.tables)?;
        let slot = tables
            .brackets
            .iter_mut()
            .find(|b| b.id == Some(id))
            .ok_or_else(|| EngineError::not_found("tax bracket", id))?;
        bracket.id = Some(id);
        *slot = bracket.clone();
        Ok(bracket)
    }

    /// Removes the bracket with id `id`.
    pub fn delete_tax_bracket(&self, id: u64) -> EngineResult<()> {
        let mut tables = write(&self.tables)?;
        let before = tables.brackets.len();
        tables.brackets.retain(|b| b.id != Some(id));
        if tables.brackets.len() == before {
            return Err(EngineError::not_found("tax bracket", id));
        }
        Ok(())
    }

    /// Adds an overtime band.
    pub fn add_overtime_band(&self, band: OvertimeBand) -> EngineResult<()> {
        write(&self.tables)?.bands.push(band);
        Ok(())
    }
}

impl RateCatalogSource for InMemoryRateCatalog {
    fn snapshot(&self) -> EngineResult<RateCatalog> {
        let tables = read(&self.tables)?;
        Ok(RateCatalog::new(
            tables.capped.clone(),
            tables.flat.clone(),
            tables.brackets.clone(),
            tables.bands.clone(),
        ))
    }
}
