//! Read-only dashboard state.
//!
//! The loaded tables are an explicitly constructed context passed to the
//! server rather than module-level globals, so multiple dashboard instances
//! or test harnesses can run in isolation. The context is immutable after
//! construction; handlers only read.

use crate::chart::{generate_liquidity_line, generate_volume_lines};
use crate::loader::schema::Chain;
use crate::normalizer::NormalizedRecord;
use crate::utils::error::DashboardError;
use std::collections::BTreeMap;

/// Immutable per-chain tables backing the dashboard
#[derive(Debug, Clone)]
pub struct DashboardContext {
    tables: BTreeMap<Chain, Vec<NormalizedRecord>>,
}

impl DashboardContext {
    /// Build the context from the unified normalized table
    pub fn new(records: Vec<NormalizedRecord>) -> Self {
        let mut tables: BTreeMap<Chain, Vec<NormalizedRecord>> = BTreeMap::new();
        for record in records {
            tables.entry(record.chain).or_default().push(record);
        }
        Self { tables }
    }

    /// Resolve a chain identifier from the interaction boundary.
    ///
    /// # Errors
    /// * `DashboardError::ChainNotFound` - Identifier outside the enumerated
    ///   set of six chains
    pub fn resolve(&self, identifier: &str) -> Result<Chain, DashboardError> {
        Chain::from_label(identifier)
            .ok_or_else(|| DashboardError::ChainNotFound(identifier.to_string()))
    }

    /// Records for a known chain (empty slice if its file had no rows)
    pub fn records(&self, chain: Chain) -> &[NormalizedRecord] {
        self.tables.get(&chain).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Render the volume-components line chart for a selected identifier
    pub fn volume_chart(&self, identifier: &str) -> Result<String, DashboardError> {
        let chain = self.resolve(identifier)?;
        Ok(generate_volume_lines(chain, self.records(chain))?)
    }

    /// Render the liquidity line chart for a selected identifier
    pub fn liquidity_chart(&self, identifier: &str) -> Result<String, DashboardError> {
        let chain = self.resolve(identifier)?;
        Ok(generate_liquidity_line(chain, self.records(chain))?)
    }
}
