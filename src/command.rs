use tracing::debug;

// Non-SQL statements like .exit are called "meta-commands".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Unrecognized,
}

impl MetaCommand {
    fn parse(input: &str) -> Option<MetaCommand> {
        match input {
            ".exit" => Some(MetaCommand::Exit),
            _ if input.starts_with('.') => Some(MetaCommand::Unrecognized),
            _ => None,
        }
    }
}

/// Where an input line is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType<'a> {
    Meta(MetaCommand),
    Statement(&'a str),
}

impl<'a> InputType<'a> {
    pub fn parse(input: &'a str) -> InputType<'a> {
        let input_type = match MetaCommand::parse(input) {
            Some(meta) => InputType::Meta(meta),
            None => InputType::Statement(input),
        };
        debug!(?input_type, "classified input");
        input_type
    }
}
