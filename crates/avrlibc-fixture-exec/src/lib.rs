//! Fixture execution adapter shared by harness tooling.
//!
//! Maps a serialized fixture's `function` name and JSON `inputs` onto the
//! reference routines in `avrlibc-core`, and renders the result the way
//! fixtures store expectations:
//! - binary32 values as `0x`-prefixed 8-digit hex bit patterns;
//! - integers in decimal;
//! - strings verbatim.

#![forbid(unsafe_code)]

use std::cmp::Ordering;

use avrlibc_core::pgmspace::{self, ProgMem, ProgMemFault};
use avrlibc_core::stdio::{Arg, PrintfError, format_bytes};
use avrlibc_core::stdlib::AssertionFailure;
use avrlibc_core::{fplib, math, stdlib};
use serde_json::Value;
use thiserror::Error;

/// Outcome of running one fixture case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Rendered result, comparable with `expected_output`.
    pub output: String,
    /// Raw bit pattern when the routine returns a float.
    pub bits: Option<u32>,
}

impl Execution {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            bits: None,
        }
    }

    fn float(value: f32) -> Self {
        let bits = value.to_bits();
        Self {
            output: format_bits(bits),
            bits: Some(bits),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("unsupported function: {0}")]
    UnsupportedFunction(String),
    #[error("missing input field '{0}'")]
    MissingInput(&'static str),
    #[error("invalid input field '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("printf: {0}")]
    Printf(#[from] PrintfError),
    #[error("program memory: {0}")]
    ProgMem(#[from] ProgMemFault),
}

/// Render a binary32 bit pattern as fixtures store it.
#[must_use]
pub fn format_bits(bits: u32) -> String {
    format!("0x{bits:08x}")
}

/// Parse a `0x`-prefixed (or bare) hex bit pattern.
pub fn parse_bits(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u32::from_str_radix(digits, 16).ok()
}

/// Execute `function` on `inputs` with the reference routines.
pub fn execute_fixture_case(function: &str, inputs: &Value) -> Result<Execution, ExecError> {
    match function {
        "addsf3" => binary_float(inputs, fplib::addsf3),
        "subsf3" => binary_float(inputs, fplib::subsf3),
        "mulsf3" => binary_float(inputs, fplib::mulsf3),
        "divsf3" => binary_float(inputs, fplib::divsf3),
        "unordsf2" => {
            let (a, b) = (float_field(inputs, "a")?, float_field(inputs, "b")?);
            Ok(Execution::text(fplib::unordsf2(a, b).to_string()))
        }
        "cmpsf2" => {
            let (a, b) = (float_field(inputs, "a")?, float_field(inputs, "b")?);
            Ok(Execution::text(fplib::cmpsf2(a, b).to_string()))
        }
        "negsf2" => Ok(Execution::float(fplib::negsf2(float_field(inputs, "a")?))),
        "fixsfsi" => Ok(Execution::text(
            fplib::fixsfsi(float_field(inputs, "a")?).to_string(),
        )),
        "fixunssfsi" => Ok(Execution::text(
            fplib::fixunssfsi(float_field(inputs, "a")?).to_string(),
        )),
        "floatsisf" => Ok(Execution::float(fplib::floatsisf(int_as(inputs, "n")?))),
        "floatunsisf" => Ok(Execution::float(fplib::floatunsisf(int_as(inputs, "n")?))),
        "sin" => unary_float(inputs, math::sin),
        "cos" => unary_float(inputs, math::cos),
        "tan" => unary_float(inputs, math::tan),
        "fabs" => unary_float(inputs, math::fabs),
        "sqrt" => unary_float(inputs, math::sqrt),
        "floor" => unary_float(inputs, math::floor),
        "ceil" => unary_float(inputs, math::ceil),
        "itoa" => {
            let value = int_as(inputs, "value")?;
            Ok(Execution::text(stdlib::itoa(value, radix(inputs)?)))
        }
        "ltoa" => {
            let value = int_as(inputs, "value")?;
            Ok(Execution::text(stdlib::ltoa(value, radix(inputs)?)))
        }
        "utoa" => {
            let value = int_as(inputs, "value")?;
            Ok(Execution::text(stdlib::utoa(value, radix(inputs)?)))
        }
        "ultoa" => {
            let value = int_as(inputs, "value")?;
            Ok(Execution::text(stdlib::ultoa(value, radix(inputs)?)))
        }
        "strtol" => {
            let s = str_field(inputs, "s")?;
            let (value, consumed) = stdlib::strtol(s.as_bytes(), int_as(inputs, "base")?);
            Ok(Execution::text(format!("{value},{consumed}")))
        }
        "strtoul" => {
            let s = str_field(inputs, "s")?;
            let (value, consumed) = stdlib::strtoul(s.as_bytes(), int_as(inputs, "base")?);
            Ok(Execution::text(format!("{value},{consumed}")))
        }
        "atoi" => Ok(Execution::text(
            stdlib::atoi(str_field(inputs, "s")?.as_bytes()).to_string(),
        )),
        "atol" => Ok(Execution::text(
            stdlib::atol(str_field(inputs, "s")?.as_bytes()).to_string(),
        )),
        "memcmp_P" => {
            let ram = str_field(inputs, "ram")?;
            let flash = str_field(inputs, "flash")?;
            let order = pgmspace::memcmp_p(
                ram.as_bytes(),
                ProgMem::new(flash.as_bytes()),
                int_as(inputs, "n")?,
            );
            Ok(Execution::text(ordering_sign(order).to_string()))
        }
        "pgm_read_dword" => {
            let words = field(inputs, "words")?
                .as_array()
                .ok_or_else(|| ExecError::InvalidInput {
                    field: "words",
                    reason: String::from("expected an array of 32-bit words"),
                })?
                .iter()
                .map(dword)
                .collect::<Result<Vec<_>, _>>()?;
            let image = pgmspace::pack_dwords(&words);
            let value = ProgMem::new(&image).read_dword(int_as(inputs, "addr")?)?;
            Ok(Execution::text(value.to_string()))
        }
        "assert" => {
            let func = inputs.get("func").and_then(Value::as_str);
            let failure = AssertionFailure::new(
                func,
                str_field(inputs, "file")?,
                int_as(inputs, "line")?,
                str_field(inputs, "expr")?,
            );
            Ok(Execution::text(failure.to_string()))
        }
        "sprintf" => {
            let format = str_field(inputs, "format")?;
            let raw_args = inputs
                .get("args")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let args = raw_args
                .iter()
                .map(printf_arg)
                .collect::<Result<Vec<_>, _>>()?;
            let out = format_bytes(format.as_bytes(), &args)?;
            Ok(Execution::text(String::from_utf8_lossy(&out)))
        }
        other => Err(ExecError::UnsupportedFunction(other.to_string())),
    }
}

fn binary_float(inputs: &Value, op: fn(f32, f32) -> f32) -> Result<Execution, ExecError> {
    let a = float_field(inputs, "a")?;
    let b = float_field(inputs, "b")?;
    Ok(Execution::float(op(a, b)))
}

fn unary_float(inputs: &Value, op: fn(f32) -> f32) -> Result<Execution, ExecError> {
    Ok(Execution::float(op(float_field(inputs, "x")?)))
}

fn ordering_sign(order: Ordering) -> i32 {
    match order {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

fn field<'a>(inputs: &'a Value, name: &'static str) -> Result<&'a Value, ExecError> {
    inputs.get(name).ok_or(ExecError::MissingInput(name))
}

fn float_field(inputs: &Value, name: &'static str) -> Result<f32, ExecError> {
    let raw = field(inputs, name)?;
    raw.as_str()
        .and_then(parse_bits)
        .map(f32::from_bits)
        .ok_or_else(|| ExecError::InvalidInput {
            field: name,
            reason: format!("expected a hex bit pattern, got {raw}"),
        })
}

fn int_field(inputs: &Value, name: &'static str) -> Result<i64, ExecError> {
    let raw = field(inputs, name)?;
    raw.as_i64().ok_or_else(|| ExecError::InvalidInput {
        field: name,
        reason: format!("expected an integer, got {raw}"),
    })
}

/// An integer field narrowed to the routine's parameter type.
fn int_as<T: TryFrom<i64>>(inputs: &Value, name: &'static str) -> Result<T, ExecError> {
    let value = int_field(inputs, name)?;
    T::try_from(value).map_err(|_| ExecError::InvalidInput {
        field: name,
        reason: format!("{value} does not fit in {}", std::any::type_name::<T>()),
    })
}

fn dword(value: &Value) -> Result<u32, ExecError> {
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| ExecError::InvalidInput {
            field: "words",
            reason: format!("{value} is not a 32-bit word"),
        })
}

fn str_field<'a>(inputs: &'a Value, name: &'static str) -> Result<&'a str, ExecError> {
    let raw = field(inputs, name)?;
    raw.as_str().ok_or_else(|| ExecError::InvalidInput {
        field: name,
        reason: format!("expected a string, got {raw}"),
    })
}

fn radix(inputs: &Value) -> Result<i32, ExecError> {
    int_as(inputs, "radix")
}

fn printf_arg(value: &Value) -> Result<Arg<'_>, ExecError> {
    if let Some(v) = value.as_i64() {
        return Ok(Arg::Int(v));
    }
    if let Some(v) = value.as_u64() {
        return Ok(Arg::Int(v as i64));
    }
    if let Some(v) = value.as_f64() {
        return Ok(Arg::Double(v));
    }
    if let Some(s) = value.as_str() {
        return Ok(Arg::Str(s.as_bytes()));
    }
    Err(ExecError::InvalidInput {
        field: "args",
        reason: format!("unsupported printf argument {value}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn adds_infinities_by_bit_pattern() {
        let run = execute_fixture_case("addsf3", &json!({"a": "0x7f800000", "b": "0xff800000"}))
            .unwrap();
        assert_eq!(run.bits.map(|b| b & 0x7f80_0000), Some(0x7f80_0000));
        assert_ne!(run.bits.map(|b| b & 0x007f_ffff), Some(0));

        let run = execute_fixture_case("addsf3", &json!({"a": "0x7f7fffff", "b": "0x7f7fffff"}))
            .unwrap();
        assert_eq!(run.output, "0x7f800000");
    }

    #[test]
    fn integer_results_render_in_decimal() {
        let run = execute_fixture_case("fixsfsi", &json!({"a": "0xcf000000"})).unwrap();
        assert_eq!(run.output, "-2147483648");
        let run = execute_fixture_case("unordsf2", &json!({"a": "0x7fc00000", "b": "0x00000000"}))
            .unwrap();
        assert_eq!(run.output, "1");
    }

    #[test]
    fn itoa_and_strtol() {
        let run = execute_fixture_case("itoa", &json!({"value": -1, "radix": 16})).unwrap();
        assert_eq!(run.output, "ffff");
        let run = execute_fixture_case("strtol", &json!({"s": "  -42xyz", "base": 10})).unwrap();
        assert_eq!(run.output, "-42,5");
    }

    #[test]
    fn out_of_range_integers_are_rejected() {
        assert!(matches!(
            execute_fixture_case("itoa", &json!({"value": 70000, "radix": 10})),
            Err(ExecError::InvalidInput { field: "value", .. })
        ));
        assert!(matches!(
            execute_fixture_case("utoa", &json!({"value": -1, "radix": 10})),
            Err(ExecError::InvalidInput { field: "value", .. })
        ));
        assert!(matches!(
            execute_fixture_case("ltoa", &json!({"value": 1, "radix": 4_294_967_306_i64})),
            Err(ExecError::InvalidInput { field: "radix", .. })
        ));
        assert!(matches!(
            execute_fixture_case("strtol", &json!({"s": "1", "base": u64::MAX})),
            Err(ExecError::InvalidInput { field: "base", .. })
        ));
        let run = execute_fixture_case("utoa", &json!({"value": 65535, "radix": 16})).unwrap();
        assert_eq!(run.output, "ffff");
    }

    #[test]
    fn float_compare_and_unsigned_conversions() {
        let cmp = |a: &str, b: &str| {
            execute_fixture_case("cmpsf2", &json!({"a": a, "b": b})).unwrap().output
        };
        assert_eq!(cmp("0x3f800000", "0x40000000"), "-1");
        assert_eq!(cmp("0x80000000", "0x00000000"), "0");
        assert_eq!(cmp("0x7fc00000", "0x00000000"), "1");

        let run = execute_fixture_case("fixunssfsi", &json!({"a": "0x4f7fffff"})).unwrap();
        assert_eq!(run.output, "4294967040");
        let run = execute_fixture_case("floatunsisf", &json!({"n": 4_294_967_295_u32})).unwrap();
        assert_eq!(run.output, "0x4f800000");
        let run = execute_fixture_case("floatsisf", &json!({"n": -3})).unwrap();
        assert_eq!(run.output, "0xc0400000");
        let run = execute_fixture_case("negsf2", &json!({"a": "0x7fc01234"})).unwrap();
        assert_eq!(run.output, "0xffc01234");
    }

    #[test]
    fn rounding_and_magnitude_functions() {
        let unary = |f: &str, x: &str| execute_fixture_case(f, &json!({"x": x})).unwrap().output;
        assert_eq!(unary("floor", "0xbfc00000"), "0xc0000000");
        assert_eq!(unary("ceil", "0xbfc00000"), "0xbf800000");
        assert_eq!(unary("fabs", "0x80000000"), "0x00000000");
        assert_eq!(unary("sqrt", "0x40100000"), "0x3fc00000");
        assert_eq!(unary("tan", "0x00000000"), "0x00000000");
    }

    #[test]
    fn string_conversions_and_flash_reads() {
        let run = execute_fixture_case("strtoul", &json!({"s": "-1", "base": 10})).unwrap();
        assert_eq!(run.output, "4294967295,2");
        let run = execute_fixture_case("atoi", &json!({"s": " 40000"})).unwrap();
        assert_eq!(run.output, "-25536");
        let run = execute_fixture_case("atol", &json!({"s": "-100000z"})).unwrap();
        assert_eq!(run.output, "-100000");

        let memcmp = |n: u32| {
            execute_fixture_case("memcmp_P", &json!({"ram": "abc", "flash": "abd", "n": n}))
                .unwrap()
                .output
        };
        assert_eq!(memcmp(2), "0");
        assert_eq!(memcmp(3), "-1");

        let words = json!({"words": [0xbe46_3583_u32, 0xbe44_f940_u32], "addr": 4});
        let run = execute_fixture_case("pgm_read_dword", &words).unwrap();
        assert_eq!(run.output, 0xbe44_f940_u32.to_string());
        assert!(matches!(
            execute_fixture_case("pgm_read_dword", &json!({"words": [1], "addr": 2})),
            Err(ExecError::ProgMem(_))
        ));
    }

    #[test]
    fn assertion_message() {
        let run = execute_fixture_case(
            "assert",
            &json!({"func": "main", "file": "t.c", "line": 12, "expr": "x == 1"}),
        )
        .unwrap();
        assert_eq!(run.output, "Assertion failed: (x == 1), function main, file t.c, line 12.");
        let run =
            execute_fixture_case("assert", &json!({"file": "t.c", "line": 3, "expr": "p"})).unwrap();
        assert_eq!(run.output, "Assertion failed: (p), file t.c, line 3.");
    }

    #[test]
    fn sprintf_mixes_argument_kinds() {
        let run = execute_fixture_case(
            "sprintf",
            &json!({"format": "%s=%#o", "args": ["oct", 8]}),
        )
        .unwrap();
        assert_eq!(run.output, "oct=010");
    }

    #[test]
    fn rejects_unknown_functions_and_bad_inputs() {
        assert!(matches!(
            execute_fixture_case("memcpy", &json!({})),
            Err(ExecError::UnsupportedFunction(_))
        ));
        assert!(matches!(
            execute_fixture_case("sin", &json!({})),
            Err(ExecError::MissingInput("x"))
        ));
        assert!(matches!(
            execute_fixture_case("sin", &json!({"x": 1.5})),
            Err(ExecError::InvalidInput { field: "x", .. })
        ));
        assert!(matches!(
            execute_fixture_case("sprintf", &json!({"format": "%d"})),
            Err(ExecError::Printf(PrintfError::MissingArgument { index: 1 }))
        ));
    }

    #[test]
    fn bit_pattern_helpers() {
        assert_eq!(parse_bits("0x3F800000"), Some(0x3f80_0000));
        assert_eq!(parse_bits("3f800000"), Some(0x3f80_0000));
        assert_eq!(parse_bits("0xzz"), None);
        assert_eq!(format_bits(0x80), "0x00000080");
    }
}
