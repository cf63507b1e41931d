//! Assigning resolved argument values to a binding's input ports.

use crate::binding::{ArgValue, Binding, PortDirection};
use crate::error::{ImportError, ImportWarning, WarningKind};

const INTEGER_TYPES: &[&str] = &[
    "SInt8", "SInt16", "SInt32", "SInt64", "UInt8", "UInt16", "UInt32", "UInt64", "Integer",
    "Size", "Index",
];

const FLOAT_TYPES: &[&str] = &["Float32", "Float64", "Scalar"];

/// Whether a value of this kind can be assigned to a port of `resolved_type`.
pub fn accepts(resolved_type: &str, value: &ArgValue) -> bool {
    match value {
        ArgValue::String(_) => resolved_type == "String",
        ArgValue::Boolean(_) => resolved_type == "Boolean",
        ArgValue::Integer(_) => {
            INTEGER_TYPES.contains(&resolved_type) || FLOAT_TYPES.contains(&resolved_type)
        }
        ArgValue::Float(_) => FLOAT_TYPES.contains(&resolved_type),
        ArgValue::Mesh(_) => resolved_type == "PolygonMesh",
        ArgValue::Objects(_) => false,
    }
}

/// Sets each named value on the matching input port before the binding runs.
///
/// Values that do not fit their port, or that the binding rejects, are
/// skipped and reported as warnings.
///
/// # Errors
/// [`ImportError::UnknownArgument`] if a name matches no input port.
pub fn apply_arguments<B, I, K>(binding: &mut B, args: I) -> Result<Vec<ImportWarning>, ImportError>
where
    B: Binding + ?Sized,
    I: IntoIterator<Item = (K, ArgValue)>,
    K: Into<String>,
{
    let ports = binding.ports();
    let mut warnings = Vec::new();

    for (name, value) in args {
        let name = name.into();
        let Some(port) = ports
            .iter()
            .find(|port| port.direction == PortDirection::In && port.name == name)
        else {
            log::error!("Argument {name} does not exist in import pattern.");
            return Err(ImportError::UnknownArgument(name));
        };

        if !accepts(&port.resolved_type, &value) {
            log::warn!(
                "Argument {name} cannot be set since {} does not accept {}.",
                port.resolved_type,
                value.kind_name()
            );
            warnings.push(ImportWarning::new(
                WarningKind::ArgumentSkipped,
                name,
                format!("{} does not accept {}", port.resolved_type, value.kind_name()),
            ));
            continue;
        }

        if let Err(err) = binding.set_arg_value(&name, value) {
            log::warn!("Argument {name} could not be set: {err}");
            warnings.push(ImportWarning::new(
                WarningKind::ArgumentSkipped,
                name,
                err.to_string(),
            ));
        }
    }

    Ok(warnings)
}
