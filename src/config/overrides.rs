// src/config/overrides.rs
//
// `-name value` command-line overrides, matched case-insensitively

use std::str::FromStr;

use super::{Config, ConfigError, DeviceKind};

fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    value.trim().parse().map_err(|_| ConfigError::InvalidOverride {
        flag: flag.to_string(),
        value: value.clone(),
    })
}

impl Config {
    pub fn apply_overrides(&mut self, args: &[String]) -> Result<(), ConfigError> {
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let flag = arg.to_ascii_lowercase();
            let render = &mut self.render;
            match flag.as_str() {
                "-size" => render.size = parse_value(arg, iter.next())?,
                "-dwell" => render.dwell = parse_value(arg, iter.next())?,
                "-hidden_dwell" => render.hidden_dwell = parse_value(arg, iter.next())?,
                "-xpos" => render.xpos = parse_value(arg, iter.next())?,
                "-ypos" => render.ypos = parse_value(arg, iter.next())?,
                "-color" => render.color = parse_value(arg, iter.next())?,
                "-divider" => render.divider = parse_value(arg, iter.next())?,
                "-device" => {
                    let name: String = parse_value(arg, iter.next())?;
                    self.device.kind =
                        DeviceKind::parse(&name).ok_or(ConfigError::InvalidOverride {
                            flag: arg.clone(),
                            value: name,
                        })?;
                }
                _ => Config::warn_unknown_flag(arg),
            }
        }
        self.render.validate()
    }
}
