//! Host-facing parameter metadata.
//!
//! Components that expose tunable values describe them through
//! [`ParameterInfo`] so a host layer can build controls, display units, and
//! map automation without knowing the component's concrete type. The core
//! keeps no persistence; saving and restoring parameter values is the
//! host's concern.

/// Display unit for a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// Unitless scalar.
    None,
    /// Decibels.
    Decibels,
    /// Frequency in Hertz.
    Hertz,
    /// Percentage (0-100).
    Percent,
}

/// Static description of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name.
    pub name: &'static str,
    /// Abbreviated name for narrow layouts.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Lower bound of the host-visible range.
    pub min: f32,
    /// Upper bound of the host-visible range.
    pub max: f32,
    /// Default value.
    pub default: f32,
    /// Step granularity for discrete host controls.
    pub step: f32,
}

/// Uniform parameter access for host layers.
pub trait ParameterInfo {
    /// Number of parameters this component exposes.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index` (0.0 out of range).
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index`, clamping to its host-visible range.
    /// Out-of-range indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);
}
