//! Random netlist generation.
//!
//! Produces well-formed netlists for exercising the drawing pipeline on
//! circuits larger than anyone wants to write by hand. Generation is seeded,
//! so the same parameters always give the same netlist.
//!
//! LUTs and FFs are split into `phases` consecutive groups of equal size,
//! the last group taking the remainder, and each atom records its group in
//! `phase`. Wiring then proceeds as follows:
//!
//! 1. With more than one phase, a fixed number of random links (ten per pair
//!    of phases) join an input of one phase to an output of another.
//! 2. Inside each phase, every still undriven input is connected with
//!    probability `connect_prob` to an output of the same phase. Only the
//!    first phase may also draw from the input pins.
//! 3. Every output pin is driven by an output of the last phase.
//!
//! Each input port ends up with at most one driver.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::model::Netlist;
use super::types::{Atom, AtomKind, OutputPort};
use crate::error::{NetlistError, Result};

/// Probability that a logic input port gets a driver.
pub const DEFAULT_CONNECT_PROB: f64 = 0.25;

/// Random links made between each pair of phases.
const LINKS_PER_PHASE_PAIR: usize = 10;

/// Parameters for a random netlist.
#[derive(Debug, Clone)]
pub struct RandomNetlist {
    /// Number of input pins
    pub ipins: usize,
    /// Number of output pins
    pub opins: usize,
    /// Number of lookup tables
    pub luts: usize,
    /// Number of flip-flops
    pub ffs: usize,
    /// Input ports per LUT/FF
    pub inputs: usize,
    /// Output ports per LUT/FF
    pub outputs: usize,
    /// Number of phase groups the LUTs and FFs are split into
    pub phases: usize,
    /// Probability a logic input port is connected
    pub connect_prob: f64,
    /// RNG seed
    pub seed: u64,
}

impl Default for RandomNetlist {
    fn default() -> Self {
        Self {
            ipins: 10,
            opins: 5,
            luts: 20,
            ffs: 20,
            inputs: 3,
            outputs: 3,
            phases: 1,
            connect_prob: DEFAULT_CONNECT_PROB,
            seed: 0,
        }
    }
}

/// Where a connection comes from.
#[derive(Debug, Clone, Copy)]
enum Driver {
    Logic { atom: usize, port: usize },
    Pin(usize),
}

/// Fan-out lists under construction, plus which logic inputs are taken.
struct Wiring {
    logic_fanout: Vec<Vec<Vec<String>>>,
    pin_fanout: Vec<Vec<String>>,
    driven: Vec<Vec<bool>>,
}

impl Wiring {
    fn new(logic: usize, inputs: usize, outputs: usize, ipins: usize) -> Self {
        Self {
            logic_fanout: vec![vec![Vec::new(); outputs]; logic],
            pin_fanout: vec![Vec::new(); ipins],
            driven: vec![vec![false; inputs]; logic],
        }
    }

    fn attach(&mut self, driver: Driver, dest: String) {
        match driver {
            Driver::Logic { atom, port } => self.logic_fanout[atom][port].push(dest),
            Driver::Pin(pin) => self.pin_fanout[pin].push(dest),
        }
    }

    /// Drive input `port` of logic atom `atom` unless it already has a driver.
    fn drive(&mut self, driver: Driver, atom: usize, port: usize, id: &str) {
        if !self.driven[atom][port] {
            self.driven[atom][port] = true;
            self.attach(driver, input_port(id, port));
        }
    }
}

impl RandomNetlist {
    /// Create a generator for the given atom counts with default port shape.
    pub fn new(ipins: usize, opins: usize, luts: usize, ffs: usize) -> Self {
        Self {
            ipins,
            opins,
            luts,
            ffs,
            ..Self::default()
        }
    }

    pub fn with_ports(mut self, inputs: usize, outputs: usize) -> Self {
        self.inputs = inputs;
        self.outputs = outputs;
        self
    }

    pub fn with_phases(mut self, phases: usize) -> Self {
        self.phases = phases;
        self
    }

    pub fn with_connect_prob(mut self, connect_prob: f64) -> Self {
        self.connect_prob = connect_prob;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(NetlistError::InvalidGeneratorParam {
                message: message.to_string(),
            })
        };
        if self.luts + self.ffs == 0 {
            return invalid("at least one LUT or FF is required");
        }
        if self.inputs == 0 || self.outputs == 0 {
            return invalid("LUTs and FFs need at least one input and one output port");
        }
        if self.phases == 0 {
            return invalid("at least one phase is required");
        }
        if self.phases > 1 && self.luts / self.phases + self.ffs / self.phases == 0 {
            return invalid("too many phases: every phase needs at least one LUT or FF");
        }
        if self.phases > u32::MAX as usize {
            return invalid("phase count does not fit the phase attribute");
        }
        if !(0.0..=1.0).contains(&self.connect_prob) {
            return invalid("connect probability must lie in [0, 1]");
        }
        Ok(())
    }

    /// Logic atom indices (LUTs first, then FFs) of every phase.
    fn phase_groups(&self) -> Vec<Vec<usize>> {
        let luts_per_phase = self.luts / self.phases;
        let ffs_per_phase = self.ffs / self.phases;

        (0..self.phases)
            .map(|phase| {
                let last = phase + 1 == self.phases;
                let lut_end = if last { self.luts } else { (phase + 1) * luts_per_phase };
                let ff_end = if last { self.ffs } else { (phase + 1) * ffs_per_phase };
                (phase * luts_per_phase..lut_end)
                    .chain((phase * ffs_per_phase..ff_end).map(|ff| self.luts + ff))
                    .collect::<Vec<usize>>()
            })
            .collect()
    }

    /// Generate the netlist.
    pub fn generate(&self) -> Result<Netlist> {
        self.validate()?;

        let mut rng = StdRng::seed_from_u64(self.seed);

        // LUTs first, then FFs
        let logic: Vec<(String, AtomKind)> = (0..self.luts)
            .map(|i| (format!("lut{}", i), AtomKind::LookupTable))
            .chain((0..self.ffs).map(|i| (format!("ff{}", i), AtomKind::FlipFlop)))
            .collect();

        let groups = self.phase_groups();
        let mut phase_of = vec![0u32; logic.len()];
        for (phase, group) in groups.iter().enumerate() {
            for &atom in group {
                phase_of[atom] = phase as u32;
            }
        }

        let mut wiring = Wiring::new(logic.len(), self.inputs, self.outputs, self.ipins);

        if groups.len() > 1 {
            let links = groups.len() * (groups.len() - 1) / 2 * LINKS_PER_PHASE_PAIR;
            for _ in 0..links {
                let sink = rng.random_range(0..groups.len());
                let mut source = rng.random_range(0..groups.len() - 1);
                if source >= sink {
                    source += 1;
                }
                let atom = groups[sink][rng.random_range(0..groups[sink].len())];
                let port = rng.random_range(0..self.inputs);
                let driver = Driver::Logic {
                    atom: groups[source][rng.random_range(0..groups[source].len())],
                    port: rng.random_range(0..self.outputs),
                };
                wiring.drive(driver, atom, port, &logic[atom].0);
            }
        }

        for (phase, group) in groups.iter().enumerate() {
            let logic_sources = group.len() * self.outputs;
            let sources = if phase == 0 {
                logic_sources + self.ipins
            } else {
                logic_sources
            };
            for &atom in group {
                for port in 0..self.inputs {
                    if wiring.driven[atom][port] || !rng.random_bool(self.connect_prob) {
                        continue;
                    }
                    let pick = rng.random_range(0..sources);
                    let driver = if pick < logic_sources {
                        Driver::Logic {
                            atom: group[pick / self.outputs],
                            port: pick % self.outputs,
                        }
                    } else {
                        Driver::Pin(pick - logic_sources)
                    };
                    wiring.drive(driver, atom, port, &logic[atom].0);
                }
            }
        }

        // groups is never empty after validation
        let back = &groups[groups.len() - 1];
        for i in 0..self.opins {
            let driver = Driver::Logic {
                atom: back[rng.random_range(0..back.len())],
                port: rng.random_range(0..self.outputs),
            };
            wiring.attach(driver, opin_port(i));
        }

        let mut netlist = Netlist::new();
        for (i, fanout) in wiring.pin_fanout.into_iter().enumerate() {
            let mut pin = Atom::new(format!("ipin{}", i), AtomKind::InputPin);
            pin.outputs.push(OutputPort {
                name: "o0".to_string(),
                fanout,
            });
            netlist.add_atom(pin)?;
        }
        for i in 0..self.opins {
            netlist.add_atom(Atom::new(format!("opin{}", i), AtomKind::OutputPin).with_input(opin_port(i)))?;
        }
        for (((id, kind), ports), phase) in logic.into_iter().zip(wiring.logic_fanout).zip(phase_of) {
            let mut atom = Atom::new(id.clone(), kind);
            atom.inputs = (0..self.inputs).map(|port| input_port(&id, port)).collect();
            atom.outputs = ports
                .into_iter()
                .enumerate()
                .map(|(port, fanout)| OutputPort {
                    name: format!("o{}", port),
                    fanout,
                })
                .collect();
            atom.phase = Some(phase);
            netlist.add_atom(atom)?;
        }

        Ok(netlist)
    }
}

fn input_port(atom: &str, port: usize) -> String {
    format!("{}_i{}", atom, port)
}

fn opin_port(pin: usize) -> String {
    format!("opin{}_i0", pin)
}
