/// Terminal commands understood by the editor
///
/// A command line is split on whitespace; the first word names the command and
/// the following words are its arguments. Surplus arguments are ignored.

use std::fmt;

/// One parsed terminal command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Clear the terminal
    Clear,
    /// Print the arguments back, joined by single spaces
    Echo(String),
    AddObject { id: String, model_path: String },
    RemoveObject { id: String },
    /// Background color as 0..=255 components
    BgColor { r: u8, g: u8, b: u8 },
    Alias { key: String, value: String },
    Save { path: String },
    Load { path: String },
    /// Arm the physics simulation and start stepping it
    Simulate,
    /// Stop stepping the simulation
    Stop,
}

/// Why a command line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Blank line
    Empty,
    /// First word is not a known command
    Unknown(String),
    /// Missing or unparsable arguments; holds the usage line
    Usage(&'static str),
    /// A color component above 255
    AboveMaximum,
    /// A color component below 0
    BelowMinimum,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, ""),
            CommandError::Unknown(name) => write!(f, "Unknown command: '{}'", name),
            CommandError::Usage(usage) => write!(f, "Syntax Error! \nUsage: {}", usage),
            CommandError::AboveMaximum => write!(f, "Syntax Error! \nMaximal value is 255!"),
            CommandError::BelowMinimum => write!(f, "Syntax Error! \nMinimal value is 0!"),
        }
    }
}

impl std::error::Error for CommandError {}

const ADD_OBJECT_USAGE: &str = "addobject <id/name> <path_to_glb>";
const REMOVE_OBJECT_USAGE: &str = "rmobject <id/name>";
const BG_COLOR_USAGE: &str = "bgcolor <r> <g> <b>";
const ALIAS_USAGE: &str = "alias <key> <value>";
const SAVE_USAGE: &str = "save <path>";
const LOAD_USAGE: &str = "load <path>";

impl Command {
    /// Name and description of every command, in help order
    pub const HELP: &'static [(&'static str, &'static str)] = &[
        ("clear", "clear the screen"),
        ("echo", "echoes your text"),
        ("addobject", "adds object to scene"),
        ("rmobject", "removes object from scene"),
        ("bgcolor", "change color of renderer background"),
        ("alias", "adds path alias"),
        ("save", "saves the scene to a file"),
        ("load", "loads a scene from a file"),
        ("simulate", "starts the physics simulation"),
        ("stop", "stops the physics simulation"),
    ];

    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        match name {
            "clear" => Ok(Command::Clear),
            "echo" => Ok(Command::Echo(args.join(" "))),
            "addobject" => match args.as_slice() {
                [id, model_path, ..] => Ok(Command::AddObject {
                    id: id.to_string(),
                    model_path: model_path.to_string(),
                }),
                _ => Err(CommandError::Usage(ADD_OBJECT_USAGE)),
            },
            "rmobject" => match args.as_slice() {
                [id, ..] => Ok(Command::RemoveObject { id: id.to_string() }),
                _ => Err(CommandError::Usage(REMOVE_OBJECT_USAGE)),
            },
            "bgcolor" => parse_bg_color(&args),
            "alias" => match args.as_slice() {
                [key, value, ..] => Ok(Command::Alias {
                    key: key.to_string(),
                    value: value.to_string(),
                }),
                _ => Err(CommandError::Usage(ALIAS_USAGE)),
            },
            "save" => match args.as_slice() {
                [path, ..] => Ok(Command::Save { path: path.to_string() }),
                _ => Err(CommandError::Usage(SAVE_USAGE)),
            },
            "load" => match args.as_slice() {
                [path, ..] => Ok(Command::Load { path: path.to_string() }),
                _ => Err(CommandError::Usage(LOAD_USAGE)),
            },
            "simulate" => Ok(Command::Simulate),
            "stop" => Ok(Command::Stop),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_bg_color(args: &[&str]) -> Result<Command, CommandError> {
    let [r, g, b, ..] = args else {
        return Err(CommandError::Usage(BG_COLOR_USAGE));
    };

    let mut components = [0i64; 3];
    for (component, word) in components.iter_mut().zip([r, g, b]) {
        *component = word.parse().map_err(|_| CommandError::Usage(BG_COLOR_USAGE))?;
    }

    // Maximum is checked first: "300 -1 0" reports the maximum
    if components.iter().any(|&c| c > 255) {
        return Err(CommandError::AboveMaximum);
    }
    if components.iter().any(|&c| c < 0) {
        return Err(CommandError::BelowMinimum);
    }

    let [r, g, b] = components.map(|c| c as u8);
    Ok(Command::BgColor { r, g, b })
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
