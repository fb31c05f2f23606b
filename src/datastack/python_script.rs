use crate::datastack::codec::write_atomic;
use crate::error::Result;
use crate::validation::ArgsMap;
use chrono::Local;
use log::info;
use serde_json::Value;
use std::path::Path;

/// Generate a standalone python script that re-invokes `model_name` with the
/// embedded argument set.
///
/// Legacy/compatibility surface: the rendering is a flat literal with sorted
/// keys and fixed indentation, so regenerating from identical input is
/// byte-for-byte reproducible except for the timestamp and tool version in
/// the header. Write failures surface as [`crate::FacadeError::Persist`]
/// with no partial file left behind.
pub fn write_python_script(
    args: &ArgsMap,
    model_name: &str,
    module_reference: &str,
    destination: &Path,
) -> Result<()> {
    let script = render_script(args, model_name, module_reference);
    write_atomic(destination, script.as_bytes())?;
    info!(
        "python script for '{}' written to {}",
        model_name,
        destination.display()
    );
    Ok(())
}

fn render_script(args: &ArgsMap, model_name: &str, module_reference: &str) -> String {
    format!(
        "\
# coding=UTF-8
# -----------------------------------------------
# Generated by modelstack {version} on {timestamp}
# Model: {model_name}

import {module}

args = {args_literal}

if __name__ == '__main__':
    {module}.execute(args)
",
        version = crate::VERSION,
        timestamp = Local::now().format("%c"),
        model_name = model_name,
        module = module_reference,
        args_literal = render_args_literal(args),
    )
}

/// Render the argument map as a python dict literal, one entry per line,
/// keys sorted, 4-space indent, trailing comma on every entry
fn render_args_literal(args: &ArgsMap) -> String {
    if args.is_empty() {
        return "{}".to_string();
    }
    let mut keys: Vec<&String> = args.keys().collect();
    keys.sort();

    let mut literal = String::from("{\n");
    for key in keys {
        literal.push_str(&format!(
            "    {}: {},\n",
            python_string(key),
            python_value(&args[key.as_str()])
        ));
    }
    literal.push('}');
    literal
}

fn python_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => python_string(s),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(python_value).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let rendered: Vec<String> = keys
                .iter()
                .map(|k| format!("{}: {}", python_string(k), python_value(&map[k.as_str()])))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
    }
}

fn python_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('\'');
    quoted
}
