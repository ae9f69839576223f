//! Turns a [`GridLayout`] into the full set of hotkey bindings.
//!
//! For every grid cell `A` (row-major) the driver binds:
//!
//! * `esc:A,alt,shift` to a no-op, so a chord can be abandoned;
//! * for every cell `B` at or after `A` in reading order, both `B:A,alt,shift`
//!   and `A:B,alt,shift` to "move the focused window over the box spanning
//!   `A` and `B`".
//!
//! Then the six singleton layouts (`<key>:alt,shift`) and the directional
//! focus shortcuts.  Output order is fixed, so two runs over the same
//! configuration produce identical bindings.

use crate::grid::LabeledCell;
use crate::layout::{GridLayout, Insets, RectExpr};
use crate::operation::{is_reserved_key, Direction, Hotkey, Modifier, Operation};
use crate::traits::Host;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// A single hotkey and the operation it triggers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    pub hotkey: Hotkey,
    pub operation: Operation,
}

//  Singleton layouts

/// The fixed, named window placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Singleton {
    /// The whole regular grid, margins left free.
    PaddedFull,
    /// The top two thirds, leaving the two rightmost columns free.
    UpperLarge,
    /// The two leftmost columns of the top two rows.
    UpperLeft,
    /// The typical central working area.
    UpperRight,
    /// The whole screen, margins included.
    Full,
    /// Below the first row down into the bottom margin, leaving the two
    /// rightmost columns free.
    LowerLarge,
}

impl Singleton {
    /// Grid insets that produce this layout.
    pub fn insets(self, layout: &GridLayout) -> Insets {
        let columns = layout.columns() as i32;
        match self {
            Singleton::PaddedFull => Insets::default(),
            Singleton::UpperLarge => Insets {
                bottom: 1,
                right: 2,
                ..Default::default()
            },
            Singleton::UpperLeft => Insets {
                bottom: 1,
                right: columns - 2,
                ..Default::default()
            },
            Singleton::UpperRight => Insets {
                left: columns - 4,
                bottom: 1,
                right: 2,
                ..Default::default()
            },
            Singleton::Full => Insets {
                bottom: -1,
                right: -1,
                ..Default::default()
            },
            Singleton::LowerLarge => Insets {
                top: 1,
                bottom: -1,
                right: 2,
                ..Default::default()
            },
        }
    }

    pub fn rect(self, layout: &GridLayout) -> RectExpr {
        layout.full_with_margin(self.insets(layout))
    }
}

/// Error from building [`SingletonKeys`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SingletonError {
    #[error("singleton key {0:?} is assigned more than once")]
    Duplicate(char),
    #[error("singleton key {0:?} cannot be used in a hotkey")]
    Reserved(char),
}

/// Which key (with `alt,shift`) triggers each singleton layout.
///
/// The six keys must be distinct and usable in hotkey notation; this is
/// checked on construction and on deserialisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSingletonKeys")]
pub struct SingletonKeys {
    padded_full: char,
    full: char,
    upper_left: char,
    upper_right: char,
    upper_large: char,
    lower_large: char,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawSingletonKeys {
    padded_full: char,
    full: char,
    upper_left: char,
    upper_right: char,
    upper_large: char,
    lower_large: char,
}

impl Default for RawSingletonKeys {
    fn default() -> Self {
        Self {
            padded_full: '-',
            full: '=',
            upper_left: '[',
            upper_right: ']',
            upper_large: '\'',
            lower_large: '/',
        }
    }
}

impl TryFrom<RawSingletonKeys> for SingletonKeys {
    type Error = SingletonError;

    fn try_from(raw: RawSingletonKeys) -> Result<Self, Self::Error> {
        SingletonKeys::new(
            raw.padded_full,
            raw.full,
            raw.upper_left,
            raw.upper_right,
            raw.upper_large,
            raw.lower_large,
        )
    }
}

impl Default for SingletonKeys {
    fn default() -> Self {
        let raw = RawSingletonKeys::default();
        Self {
            padded_full: raw.padded_full,
            full: raw.full,
            upper_left: raw.upper_left,
            upper_right: raw.upper_right,
            upper_large: raw.upper_large,
            lower_large: raw.lower_large,
        }
    }
}

impl SingletonKeys {
    pub fn new(
        padded_full: char,
        full: char,
        upper_left: char,
        upper_right: char,
        upper_large: char,
        lower_large: char,
    ) -> Result<Self, SingletonError> {
        let keys = Self {
            padded_full,
            full,
            upper_left,
            upper_right,
            upper_large,
            lower_large,
        };
        let all = keys.entries();
        for (i, (_, key)) in all.iter().enumerate() {
            if is_reserved_key(*key) {
                return Err(SingletonError::Reserved(*key));
            }
            if all[..i].iter().any(|(_, k)| k == key) {
                return Err(SingletonError::Duplicate(*key));
            }
        }
        Ok(keys)
    }

    pub fn key(&self, singleton: Singleton) -> char {
        match singleton {
            Singleton::PaddedFull => self.padded_full,
            Singleton::Full => self.full,
            Singleton::UpperLeft => self.upper_left,
            Singleton::UpperRight => self.upper_right,
            Singleton::UpperLarge => self.upper_large,
            Singleton::LowerLarge => self.lower_large,
        }
    }

    /// Every singleton with its key, in binding order.
    pub fn entries(&self) -> [(Singleton, char); 6] {
        [
            Singleton::PaddedFull,
            Singleton::UpperLarge,
            Singleton::UpperLeft,
            Singleton::UpperRight,
            Singleton::Full,
            Singleton::LowerLarge,
        ]
        .map(|s| (s, self.key(s)))
    }
}

//  Focus shortcuts

/// A hotkey that moves focus to the neighbouring window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusBinding {
    pub hotkey: Hotkey,
    pub direction: Direction,
}

/// Vim keys under `ctrl,shift` and WASD under `cmd,shift`.
pub fn default_focus_bindings() -> Vec<FocusBinding> {
    let vim = [
        ('h', Direction::Left),
        ('l', Direction::Right),
        ('k', Direction::Up),
        ('j', Direction::Down),
    ];
    let wasd = [
        ('a', Direction::Left),
        ('d', Direction::Right),
        ('w', Direction::Up),
        ('s', Direction::Down),
    ];
    let with = |keys: [(char, Direction); 4], modifier: Modifier| {
        keys.into_iter().map(move |(key, direction)| FocusBinding {
            hotkey: Hotkey::new(key, vec![modifier.clone(), Modifier::Shift]),
            direction,
        })
    };
    with(vim, Modifier::Ctrl)
        .chain(with(wasd, Modifier::Cmd))
        .collect()
}

//  Driver

/// Error from installing bindings into a [`Host`].
#[derive(Debug, thiserror::Error)]
#[error("host rejected binding {hotkey}: {source}")]
pub struct DriverError<E: std::error::Error + 'static> {
    pub hotkey: String,
    pub source: E,
}

/// Produces bindings from a layout and hands them to a [`Host`].
pub struct BindingDriver<'a> {
    layout: &'a GridLayout,
    singletons: &'a SingletonKeys,
    focus: &'a [FocusBinding],
}

impl<'a> BindingDriver<'a> {
    pub fn new(
        layout: &'a GridLayout,
        singletons: &'a SingletonKeys,
        focus: &'a [FocusBinding],
    ) -> Self {
        Self {
            layout,
            singletons,
            focus,
        }
    }

    /// The complete binding list, in registration order.
    pub fn plan(&self) -> Vec<Binding> {
        let mut out = Vec::new();
        for start in self.layout.grid().cells() {
            out.push(Binding {
                hotkey: Hotkey::chord("esc", start.label),
                operation: Operation::Noop,
            });
            self.sub_grid(start, &mut out);
        }
        out.extend(self.singleton_bindings());
        out.extend(self.focus.iter().map(|f| Binding {
            hotkey: f.hotkey.clone(),
            operation: Operation::Focus {
                direction: f.direction,
            },
        }));
        out
    }

    /// Chord bindings from `start` to every cell at or after it.
    ///
    /// Both press orders are bound; a cell paired with itself yields a
    /// single binding since both orders spell the same hotkey.
    pub fn sub_grid(&self, start: LabeledCell, out: &mut Vec<Binding>) {
        let grid = self.layout.grid();
        for end in grid.cells_from(start.cell) {
            let operation = Operation::Move(self.layout.rect(start.cell, end.cell));
            if end.cell != start.cell {
                out.push(Binding {
                    hotkey: Hotkey::chord(end.label, start.label),
                    operation: operation.clone(),
                });
            }
            out.push(Binding {
                hotkey: Hotkey::chord(start.label, end.label),
                operation,
            });
        }
    }

    fn singleton_bindings(&self) -> impl Iterator<Item = Binding> + '_ {
        self.singletons.entries().into_iter().map(|(s, key)| Binding {
            hotkey: Hotkey::alt_shift(key),
            operation: Operation::Move(s.rect(self.layout)),
        })
    }

    /// Register every binding with `host`.  Returns the number registered.
    ///
    /// Stops at the first binding the host rejects.
    pub fn install<H: Host>(&self, host: &mut H) -> Result<usize, DriverError<H::Error>> {
        let plan = self.plan();
        for binding in &plan {
            debug!("bind {} -> {}", binding.hotkey, binding.operation.kind());
            host.bind(&binding.hotkey, &binding.operation)
                .map_err(|source| DriverError {
                    hotkey: binding.hotkey.to_string(),
                    source,
                })?;
        }
        info!("registered {} bindings", plan.len());
        Ok(plan.len())
    }
}
