//! Subcommand implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use data_core::{write_predictions, AutoSource, DataSource, SaveFormat};
use forecast_facade::{ForecastConfig, WindowBuffer};
use ndarray::{Array2, Array3, Ix2, Ix3};
use scaling_facade::{
    MemoryScaleStore, Objective, ScaleStore, Scaler, ScalingConfig, ScalingEngine, ScalingError,
    Side,
};

/// Datasets handed to `scale` and `invert`.
pub struct DatasetPair {
    pub data_in: PathBuf,
    pub data_out: Option<PathBuf>,
    pub dest: PathBuf,
    pub format: SaveFormat,
}

fn load_table(source: &AutoSource, path: &Path) -> Result<Array2<f64>> {
    source
        .load_table(path)
        .with_context(|| format!("Failed to load dataset {}", path.display()))
}

fn load_pair(pair: &DatasetPair) -> Result<(Array2<f64>, Array2<f64>)> {
    let source = AutoSource::new();
    let data_in = load_table(&source, &pair.data_in)?;
    let data_out = match &pair.data_out {
        Some(path) => load_table(&source, path)?,
        None => Array2::zeros((0, 0)),
    };
    Ok((data_in, data_out))
}

fn save_pair(pair: &DatasetPair, suffix: &str, data_in: &Array2<f64>, data_out: &Array2<f64>) -> Result<()> {
    write_predictions(pair.format, data_in.view(), &pair.dest.join(format!("input_{suffix}")))?;
    if pair.data_out.is_some() {
        write_predictions(pair.format, data_out.view(), &pair.dest.join(format!("output_{suffix}")))?;
    }
    Ok(())
}

/// Scale a dataset pair and persist the fitted factors.
pub fn run_scale(config: &ScalingConfig, pair: &DatasetPair) -> Result<()> {
    let engine = config.build_engine()?;
    let (data_in, data_out) = load_pair(pair)?;
    let (scaled_in, scaled_out) = engine.preprocess(data_in, data_out)?;
    save_pair(pair, "scaled", &scaled_in, &scaled_out)
}

/// Restore a dataset pair from persisted factors.
pub fn run_invert(config: &ScalingConfig, pair: &DatasetPair) -> Result<()> {
    let engine = config.build_engine()?;
    let (data_in, data_out) = load_pair(pair)?;
    let (restored_in, restored_out) = engine.invert(data_in, data_out)?;
    save_pair(pair, "restored", &restored_in, &restored_out)
}

/// Seed as stored on disk.
enum Seed {
    /// `timesteps x features`, windowed with the configured lookback
    Series(Array2<f64>),
    /// `windows x lookback x features`
    Windows(Array3<f64>),
}

impl Seed {
    fn load(source: &AutoSource, path: &Path) -> Result<Self> {
        let seed = source
            .load(path)
            .with_context(|| format!("Failed to load seed {}", path.display()))?;
        Ok(match seed.ndim() {
            3 => Seed::Windows(seed.into_dimensionality::<Ix3>()?),
            2 => Seed::Series(seed.into_dimensionality::<Ix2>()?),
            1 => {
                let timesteps = seed.len();
                Seed::Series(seed.into_shape((timesteps, 1))?)
            }
            n => bail!("seed {} has {n} dimensions, expected a series or windows", path.display()),
        })
    }

    fn into_buffer(self, lookback: usize) -> Result<WindowBuffer> {
        Ok(match self {
            Seed::Series(series) => WindowBuffer::from_series(series.view(), lookback)?,
            Seed::Windows(windows) => WindowBuffer::from_windows(windows)?,
        })
    }

    /// Scale the seed and `data_out` with `engine`.
    ///
    /// A series is scaled as is; windows are scaled over all their rows and
    /// reshaped back.
    fn scale(self, engine: &ScalingEngine, data_out: Array2<f64>) -> Result<(Self, Array2<f64>)> {
        match self {
            Seed::Series(series) => {
                let (scaled, scaled_out) = engine.preprocess(series, data_out)?;
                Ok((Seed::Series(scaled), scaled_out))
            }
            Seed::Windows(windows) => {
                let (count, lookback, features) = windows.dim();
                let rows = windows
                    .as_standard_layout()
                    .into_owned()
                    .into_shape((count * lookback, features))?;
                let (scaled, scaled_out) = engine.preprocess(rows, data_out)?;
                Ok((Seed::Windows(scaled.into_shape((count, lookback, features))?), scaled_out))
            }
        }
    }
}

/// Roll the configured model forward and write the predictions.
pub fn run_forecast(config: &ForecastConfig) -> Result<PathBuf> {
    let source = AutoSource::new();
    let mut buffer = Seed::load(&source, &config.input_file)?.into_buffer(config.lookback)?;
    let target = config
        .target_path()
        .map(|path| load_table(&source, path))
        .transpose()?;

    let forecaster = config.build_forecaster()?;
    let predictions = forecaster.run(&mut buffer, target.as_ref().map(|t| t.view()))?;
    Ok(write_predictions(config.save_format, predictions.view(), &config.predictions_file)?)
}

/// Objectives that fit the output side need the target dataset to fit on.
fn check_pipeline(scaling: &ScalingConfig, forecast: &ForecastConfig) -> Result<(), ScalingError> {
    let fits_output = scaling.objective.fitted_sides().contains(&Side::Output);
    if fits_output && forecast.target_file.is_none() {
        return Err(ScalingError::Configuration(format!(
            "objective '{}' scales the output dataset, forecast.target_file must be set",
            scaling.objective
        )));
    }
    Ok(())
}

/// Scale the seed, roll out in scaled space and restore the predictions.
pub fn run_pipeline(scaling: &ScalingConfig, forecast: &ForecastConfig) -> Result<PathBuf> {
    check_pipeline(scaling, forecast)?;

    // Without an input log the factors only need to survive this run
    let memory: Option<Arc<dyn ScaleStore>> = scaling
        .input_log
        .is_none()
        .then(|| Arc::new(MemoryScaleStore::new()) as Arc<dyn ScaleStore>);
    let attach = |engine: ScalingEngine| match &memory {
        Some(store) => engine.with_store(Side::Input, Arc::clone(store)),
        None => engine,
    };
    let engine = attach(scaling.build_engine()?);
    let restore = attach(
        ScalingConfig {
            objective: Objective::PredictInput,
            ..scaling.clone()
        }
        .build_engine()?,
    );
    let forecaster = forecast.build_forecaster()?;

    let source = AutoSource::new();
    let seed = Seed::load(&source, &forecast.input_file)?;
    let target = forecast
        .target_path()
        .map(|path| load_table(&source, path))
        .transpose()?;

    let had_target = target.is_some();
    let (seed, scaled_out) = seed.scale(&engine, target.unwrap_or_else(|| Array2::zeros((0, 0))))?;
    let target = had_target.then_some(scaled_out);

    let mut buffer = seed.into_buffer(forecast.lookback)?;
    let predictions = forecaster.run(&mut buffer, target.as_ref().map(|t| t.view()))?;

    let predictions = if engine.objective().restored_sides().contains(&Side::Input) {
        restore.invert(predictions, Array2::zeros((0, 0)))?.0
    } else {
        predictions
    };

    Ok(write_predictions(forecast.save_format, predictions.view(), &forecast.predictions_file)?)
}
