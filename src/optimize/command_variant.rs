//! Rewrites every command in a path into a uniform coordinate variant, or,
//! in compact mode, into whichever variant prints shorter, command by
//! command. Compact ties go to relative: relative deltas tend to shrink
//! further under later precision rounding.

use crate::command::{Command, CommandVariant};
use crate::element::Element;
use crate::printer::CommandPrinter;
use crate::resolver::Resolver;
use crate::traversal::Visitor;

pub enum VariantMode {
    Absolute,
    Relative,
    Compact(Box<dyn CommandPrinter>),
}

pub struct ConvertVariant {
    mode: VariantMode,
}

impl ConvertVariant {
    pub fn absolute() -> Self {
        Self {
            mode: VariantMode::Absolute,
        }
    }

    pub fn relative() -> Self {
        Self {
            mode: VariantMode::Relative,
        }
    }

    pub fn compact(printer: Box<dyn CommandPrinter>) -> Self {
        Self {
            mode: VariantMode::Compact(printer),
        }
    }
}

impl Visitor for ConvertVariant {
    fn visit(&mut self, element: &mut Element) {
        let Some(path) = element.as_path_mut() else {
            return;
        };

        let mut resolver = Resolver::new();
        let previous = std::mem::take(&mut path.commands);
        for command in &previous {
            let target = match &self.mode {
                VariantMode::Absolute => CommandVariant::Absolute,
                VariantMode::Relative => CommandVariant::Relative,
                VariantMode::Compact(printer) => {
                    shorter_variant(&mut resolver.clone(), command, printer.as_ref())
                }
            };
            path.commands.push(resolver.resolve(command, target));
        }
    }
}

/// Both rewrites advance state identically, so trial resolution on a clone
/// leaves the caller's resolver untouched.
fn shorter_variant(
    trial: &mut Resolver,
    command: &Command,
    printer: &dyn CommandPrinter,
) -> CommandVariant {
    let absolute = printer.print(&trial.clone().resolve(command, CommandVariant::Absolute));
    let relative = printer.print(&trial.resolve(command, CommandVariant::Relative));
    if absolute.len() < relative.len() {
        CommandVariant::Absolute
    } else {
        CommandVariant::Relative
    }
}
