// src/controllers/osc_controller.rs
// Receives OSC messages that adjust the readout while it runs.
// Commands are queued and applied when the next frame is composed, so the
// render configuration stays constant within a frame.

use log::{info, warn};
use nannou_osc as osc;

use crate::config::{ConfigError, RenderConfig};

#[derive(Debug, Clone, PartialEq)]
pub enum OscCommand {
    SetColor(i32),
    SetSize(i32),
    SetPosition { x: i32, y: i32 },
    SetDwell { dwell: u32, hidden_dwell: u32 },
    SetDivider(f32),
}

impl OscCommand {
    pub fn parse(addr: &str, args: &[osc::Type]) -> Option<Self> {
        match (addr, args) {
            ("/clock/color", [osc::Type::Int(code)]) => Some(OscCommand::SetColor(*code)),
            ("/clock/size", [osc::Type::Int(size)]) => Some(OscCommand::SetSize(*size)),
            ("/clock/position", [osc::Type::Int(x), osc::Type::Int(y)]) => {
                Some(OscCommand::SetPosition { x: *x, y: *y })
            }
            ("/clock/dwell", [osc::Type::Int(dwell), osc::Type::Int(hidden)])
                if *dwell >= 0 && *hidden >= 0 =>
            {
                Some(OscCommand::SetDwell {
                    dwell: *dwell as u32,
                    hidden_dwell: *hidden as u32,
                })
            }
            ("/clock/divider", [osc::Type::Float(divider)]) => {
                Some(OscCommand::SetDivider(*divider))
            }
            _ => None,
        }
    }

    /// Applies the command, leaving `render` untouched if the result would be invalid.
    pub fn apply(&self, render: &mut RenderConfig) -> Result<(), ConfigError> {
        let mut updated = render.clone();
        match *self {
            OscCommand::SetColor(code) => updated.color = code,
            OscCommand::SetSize(size) => updated.size = size,
            OscCommand::SetPosition { x, y } => {
                updated.xpos = x;
                updated.ypos = y;
            }
            OscCommand::SetDwell {
                dwell,
                hidden_dwell,
            } => {
                updated.dwell = dwell;
                updated.hidden_dwell = hidden_dwell;
            }
            OscCommand::SetDivider(divider) => updated.divider = divider,
        }
        updated.validate()?;
        *render = updated;
        Ok(())
    }
}

/// Applies queued commands in order, skipping the ones that fail validation.
pub fn apply_commands(render: &mut RenderConfig, commands: Vec<OscCommand>) {
    for command in commands {
        match command.apply(render) {
            Ok(()) => info!("Applied {:?}", command),
            Err(e) => warn!("Rejected {:?}: {}", command, e),
        }
    }
}

pub struct OscController {
    command_queue: Vec<OscCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> Result<Self, std::io::Error> {
        let receiver = osc::receiver(port)?;
        info!("Listening for OSC commands on port {}", port);

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    pub fn process_messages(&mut self) {
        for (packet, _addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                match OscCommand::parse(&message.addr, &message.args) {
                    Some(command) => self.command_queue.push(command),
                    None => warn!("Unknown OSC message: {} {:?}", message.addr, message.args),
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<OscCommand> {
        std::mem::take(&mut self.command_queue)
    }
}
