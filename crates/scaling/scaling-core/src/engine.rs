//! Scaling engine: fits or replays scale records and applies them.

use std::sync::Arc;

use ndarray::{Array1, ArrayView2};
use scaling_spi::{
    Dataset, Objective, Result, ScaleRecord, ScaleStore, Scaler, ScalingError, ScalingMode, Side,
};

use crate::factors::compute_factors;

/// Default denominator name for scale records.
pub const DEFAULT_DENOMINATOR: &str = "scaling";

/// Per-feature scaler over an input/output dataset pair.
///
/// Each side has an optional [`ScaleStore`]. Without a store, factors are
/// still fitted and applied but not persisted, and `file` mode or inversion
/// on that side is a configuration error.
#[derive(Clone)]
pub struct ScalingEngine {
    mode: ScalingMode,
    objective: Objective,
    denominator: String,
    input_store: Option<Arc<dyn ScaleStore>>,
    output_store: Option<Arc<dyn ScaleStore>>,
}

impl ScalingEngine {
    pub fn new(mode: ScalingMode, objective: Objective) -> Self {
        Self {
            mode,
            objective,
            denominator: DEFAULT_DENOMINATOR.to_string(),
            input_store: None,
            output_store: None,
        }
    }

    /// Store and load records under `name`.
    pub fn with_denominator(mut self, name: impl Into<String>) -> Self {
        self.denominator = name.into();
        self
    }

    /// Attach the persistence store for one side.
    pub fn with_store(mut self, side: Side, store: Arc<dyn ScaleStore>) -> Self {
        match side {
            Side::Input => self.input_store = Some(store),
            Side::Output => self.output_store = Some(store),
        }
        self
    }

    pub fn mode(&self) -> ScalingMode {
        self.mode
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn denominator(&self) -> &str {
        &self.denominator
    }

    pub fn store(&self, side: Side) -> Option<&Arc<dyn ScaleStore>> {
        match side {
            Side::Input => self.input_store.as_ref(),
            Side::Output => self.output_store.as_ref(),
        }
    }

    fn require_store(&self, side: Side, purpose: &str) -> Result<&Arc<dyn ScaleStore>> {
        self.store(side).ok_or_else(|| {
            ScalingError::Configuration(format!(
                "{purpose} with objective '{}' needs a {side} scale store, none is configured",
                self.objective
            ))
        })
    }

    /// Load the persisted record for `side` and check it fits `features`.
    pub fn load_record(&self, side: Side, features: usize) -> Result<ScaleRecord> {
        let store = self.require_store(side, "loading scale records")?;
        let record = store
            .load(&self.denominator)?
            .ok_or_else(|| ScalingError::MissingScaleRecord {
                side,
                name: self.denominator.clone(),
            })?;
        if record.len() != features {
            return Err(ScalingError::ShapeMismatch {
                side,
                name: self.denominator.clone(),
                expected: features,
                actual: record.len(),
            });
        }
        Ok(record)
    }

    /// Compute, or in `file` mode load, the record for one side's data.
    pub fn fit(&self, side: Side, data: ArrayView2<'_, f64>) -> Result<ScaleRecord> {
        if self.mode.is_file() {
            return self.load_record(side, data.ncols());
        }
        if data.is_empty() {
            return Err(ScalingError::EmptyDataset { side });
        }
        let factors = compute_factors(self.mode, data)?;
        Ok(ScaleRecord::new(self.denominator.clone(), factors.to_vec()))
    }

    /// Best-effort save: write failures are logged and dropped, any other
    /// store error is returned.
    fn persist(&self, side: Side, record: &ScaleRecord) -> Result<()> {
        let Some(store) = self.store(side) else {
            tracing::debug!(%side, name = %record.name, "no scale store configured, record not persisted");
            return Ok(());
        };
        match store.save(record) {
            Ok(()) => {
                tracing::info!(%side, name = %record.name, store = %store.describe(), "scale record persisted");
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::warn!(%side, name = %record.name, error = %e, "failed to persist scale record, continuing");
                Ok(())
            }
        }
    }
}

fn select<'a>(side: Side, data_in: &'a mut Dataset, data_out: &'a mut Dataset) -> &'a mut Dataset {
    match side {
        Side::Input => data_in,
        Side::Output => data_out,
    }
}

impl Scaler for ScalingEngine {
    fn preprocess(&self, mut data_in: Dataset, mut data_out: Dataset) -> Result<(Dataset, Dataset)> {
        let sides = self.objective.fitted_sides();
        if sides.is_empty() {
            tracing::debug!(objective = %self.objective, "objective only selects datasets for inversion");
            return Ok((data_in, data_out));
        }

        let mut fitted = Vec::with_capacity(sides.len());
        for &side in sides {
            let data = select(side, &mut data_in, &mut data_out);
            let record = self.fit(side, data.view())?;
            *data /= &Array1::from(record.factors.clone());
            tracing::debug!(%side, mode = %self.mode, factors = ?record.factors, "dataset scaled");
            fitted.push((side, record));
        }

        if !self.mode.is_file() {
            for (side, record) in &fitted {
                self.persist(*side, record)?;
            }
        }

        Ok((data_in, data_out))
    }

    fn invert(&self, mut data_in: Dataset, mut data_out: Dataset) -> Result<(Dataset, Dataset)> {
        let sides = self.objective.restored_sides();

        // Load every record before touching any data
        let mut records = Vec::with_capacity(sides.len());
        for &side in sides {
            let features = select(side, &mut data_in, &mut data_out).ncols();
            records.push((side, self.load_record(side, features)?));
        }

        for (side, record) in records {
            *select(side, &mut data_in, &mut data_out) *= &Array1::from(record.factors);
            tracing::debug!(%side, name = %self.denominator, "dataset restored");
        }

        Ok((data_in, data_out))
    }
}

impl std::fmt::Debug for ScalingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalingEngine")
            .field("mode", &self.mode)
            .field("objective", &self.objective)
            .field("denominator", &self.denominator)
            .field("input_store", &self.input_store.as_ref().map(|s| s.describe()))
            .field("output_store", &self.output_store.as_ref().map(|s| s.describe()))
            .finish()
    }
}
