//! Lab session: command dispatch over one experiment run.
//!
//! Each user action becomes one [`Command`], and [`LabSession::dispatch`]
//! evaluates it to completion before returning. The session is the only owner
//! of the experiment, so commands are applied strictly in the order they are
//! dispatched.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::circuit::{ResistancePair, Topology};
use crate::config::LabParameters;
use crate::error::{ExportError, LabError, Result, ValidationError};
use crate::export::{
    export_chart, export_session, export_table, ChartSurface, ExportArtifact, ExportKind, ShareTarget,
};
use crate::state::{parse_or_zero, Experiment, InputPanel, LabView, MeasurementPoint, TableRow};

/// A single user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Lamp resistance text changed
    SetLamp(String),
    /// Resistor resistance text changed
    SetResistor(String),
    /// Voltage text changed
    SetVoltage(String),
    /// Topology selector changed; discards the run
    SelectTopology(Topology),
    /// "Add to table"
    Commit,
    Reset,
    ExportTable,
    ExportChart,
    ExportJson,
}

/// Result of a successfully applied command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    InputUpdated,
    TopologyChanged(Topology),
    Recorded(MeasurementPoint),
    Reset,
    Exported(ExportReceipt),
}

/// Where an export was delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub kind: ExportKind,
    pub path: PathBuf,
    pub size_bytes: usize,
}

/// Owns the inputs, the experiment, the chart surface and the share target
pub struct LabSession<T: ShareTarget> {
    params: LabParameters,
    inputs: InputPanel,
    experiment: Experiment,
    chart: ChartSurface,
    target: T,
}

impl<T: ShareTarget> LabSession<T> {
    /// Start a series-topology session with default inputs.
    ///
    /// The chart surface starts unmounted; call [`LabSession::chart_mut`] to lay it out.
    pub fn new(params: LabParameters, target: T) -> Self {
        let inputs = default_inputs(&params);
        let experiment = Experiment::new(Topology::default())
            .with_strict_distinct_voltages(params.protocol.strict_distinct_voltages);
        let chart = ChartSurface::new(params.chart.clone());

        let mut session = Self {
            params,
            inputs,
            experiment,
            chart,
            target,
        };
        session.sync_resistances();
        session
    }

    pub fn params(&self) -> &LabParameters {
        &self.params
    }

    pub fn inputs(&self) -> &InputPanel {
        &self.inputs
    }

    pub fn experiment(&self) -> &Experiment {
        &self.experiment
    }

    pub fn chart(&self) -> &ChartSurface {
        &self.chart
    }

    /// Mount or unmount the chart surface. The frame is redrawn afterwards.
    pub fn chart_mut(&mut self) -> ChartLayout<'_, T> {
        ChartLayout { session: self }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Apply one command. On error nothing in the session has changed.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        log::debug!("Dispatching {:?}", command);
        let result = self.apply(command);
        if let Err(e) = &result {
            log::warn!("Command rejected: {}", e);
        }
        result
    }

    fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::SetLamp(text) => {
                self.ensure_unlocked()?;
                self.inputs.lamp = text;
                self.sync_resistances();
                Ok(Outcome::InputUpdated)
            }
            Command::SetResistor(text) => {
                self.ensure_unlocked()?;
                self.inputs.resistor = text;
                self.sync_resistances();
                Ok(Outcome::InputUpdated)
            }
            Command::SetVoltage(text) => {
                self.inputs.voltage = text;
                Ok(Outcome::InputUpdated)
            }
            Command::SelectTopology(topology) => {
                self.experiment.set_topology(topology);
                let defaults = default_inputs(&self.params);
                self.inputs.lamp = defaults.lamp;
                self.inputs.resistor = defaults.resistor;
                self.sync_resistances();
                self.redraw_chart();
                Ok(Outcome::TopologyChanged(topology))
            }
            Command::Commit => {
                let point = self.commit()?;
                self.redraw_chart();
                Ok(Outcome::Recorded(point))
            }
            Command::Reset => {
                self.experiment.reset();
                self.inputs = default_inputs(&self.params);
                self.sync_resistances();
                self.redraw_chart();
                Ok(Outcome::Reset)
            }
            Command::ExportTable => {
                let artifact = export_table(&self.experiment.snapshot(), &self.params.export.csv_file_name)?;
                self.deliver(artifact)
            }
            Command::ExportChart => {
                let artifact = export_chart(&self.chart, &self.params.export.chart_file_name)?;
                self.deliver(artifact)
            }
            Command::ExportJson => {
                let artifact =
                    export_session(&self.experiment.snapshot(), &self.params.export.json_file_name)?;
                self.deliver(artifact)
            }
        }
    }

    /// Parse every input strictly, then record.
    fn commit(&mut self) -> std::result::Result<MeasurementPoint, ValidationError> {
        let voltage_v = self.inputs.voltage()?;
        if !self.experiment.is_locked() {
            let (lamp_ohm, resistor_ohm) = self.inputs.resistances()?;
            // Same values the lenient sync already holds, so a failed commit changes nothing
            self.experiment
                .set_resistances(ResistancePair::new(lamp_ohm, resistor_ohm))?;
        }
        self.experiment.commit(voltage_v)
    }

    fn ensure_unlocked(&self) -> std::result::Result<(), ValidationError> {
        if self.experiment.is_locked() {
            Err(ValidationError::ResistancesLocked)
        } else {
            Ok(())
        }
    }

    /// Mirror the resistance texts into the experiment while it is unlocked
    fn sync_resistances(&mut self) {
        if self.experiment.is_locked() {
            return;
        }
        let pair = ResistancePair::new(parse_or_zero(&self.inputs.lamp), parse_or_zero(&self.inputs.resistor));
        // Cannot fail while unlocked
        let _ = self.experiment.set_resistances(pair);
    }

    fn redraw_chart(&mut self) {
        self.chart.redraw(self.experiment.series().all());
    }

    fn deliver(&self, artifact: ExportArtifact) -> Result<Outcome> {
        let path = self
            .target
            .deliver(&artifact)
            .map_err(|e| LabError::from(ExportError::Delivery(format!("{:#}", e))))?;
        Ok(Outcome::Exported(ExportReceipt {
            kind: artifact.kind,
            path,
            size_bytes: artifact.bytes.len(),
        }))
    }

    /// Snapshot of everything a front end displays
    pub fn view(&self) -> LabView {
        let preview = self.experiment.preview(parse_or_zero(&self.inputs.voltage));
        log::debug!(
            "Preview: R={} Ω, I={} A",
            preview.total_resistance_ohm,
            preview.current_a
        );

        LabView {
            topology: self.experiment.topology(),
            state: self.experiment.state(),
            resistances_editable: !self.experiment.is_locked(),
            lamp_text: self.inputs.lamp.clone(),
            resistor_text: self.inputs.resistor.clone(),
            voltage_text: self.inputs.voltage.clone(),
            total_resistance_ohm: preview.total_resistance_ohm,
            current_a: preview.current_a,
            rows: self.experiment.series().all().iter().map(TableRow::from).collect(),
            chart_ready: self.chart.is_ready(),
        }
    }
}

/// Layout handle for the session's chart surface
pub struct ChartLayout<'a, T: ShareTarget> {
    session: &'a mut LabSession<T>,
}

impl<T: ShareTarget> ChartLayout<'_, T> {
    /// Lay out the surface at the given size and draw the current series
    pub fn mount(self, width_px: u32, height_px: u32) {
        self.session.chart.mount(width_px, height_px);
        self.session.redraw_chart();
    }

    /// Lay out the surface at the configured size
    pub fn mount_default(self) {
        self.session.chart.mount_default();
        self.session.redraw_chart();
    }

    pub fn unmount(self) {
        self.session.chart.unmount();
    }
}

fn default_inputs(params: &LabParameters) -> InputPanel {
    InputPanel::new(
        &params.inputs.lamp_resistance,
        &params.inputs.resistor_resistance,
        &params.inputs.voltage,
    )
}

/// Text command that could not be understood
#[derive(Debug, Error)]
pub enum CommandParseError {
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("unknown export format {0:?} (expected csv, chart or json)")]
    UnknownExport(String),
    #[error(transparent)]
    Topology(#[from] ValidationError),
}

impl FromStr for Command {
    type Err = CommandParseError;

    /// Parse a line such as `lamp 10`, `topology parallel`, `add` or `export csv`
    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "lamp" | "rl" => Ok(Command::SetLamp(rest.to_string())),
            "resistor" | "rr" => Ok(Command::SetResistor(rest.to_string())),
            "voltage" | "v" => Ok(Command::SetVoltage(rest.to_string())),
            "topology" => {
                if rest.is_empty() {
                    return Err(CommandParseError::MissingArgument("topology"));
                }
                Ok(Command::SelectTopology(rest.parse()?))
            }
            "add" | "commit" => Ok(Command::Commit),
            "reset" => Ok(Command::Reset),
            "export" => match rest.to_ascii_lowercase().as_str() {
                "" => Err(CommandParseError::MissingArgument("export")),
                "csv" | "table" | "data" => Ok(Command::ExportTable),
                "chart" | "png" => Ok(Command::ExportChart),
                "json" | "session" => Ok(Command::ExportJson),
                other => Err(CommandParseError::UnknownExport(other.to_string())),
            },
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}
