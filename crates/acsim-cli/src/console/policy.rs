use std::{
    fmt,
    io::{self, BufRead, Write},
    sync::Arc,
};

use acsim_engine::{Action, Crop, DecisionPolicy, Field, Game};

/// Decision policy that asks a human through numbered menus.
///
/// Once input ends (or the console fails) every further decision falls back
/// to the most passive answer: retire, plant nothing, buy nothing.
#[derive(Debug)]
pub struct ConsolePolicy<R, W> {
    input: R,
    output: W,
    closed: bool,
    error: Option<io::Error>,
}

impl<R, W> ConsolePolicy<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            closed: false,
            error: None,
        }
    }

    /// The first I/O error met while prompting, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn say(&mut self, args: fmt::Arguments<'_>) {
        if self.closed {
            return;
        }
        if let Err(e) = self.output.write_fmt(args).and_then(|()| self.output.flush()) {
            self.fail(e);
        }
    }

    fn fail(&mut self, e: io::Error) {
        self.closed = true;
        self.error.get_or_insert(e);
    }

    fn read_number(&mut self) -> Option<u32> {
        loop {
            if self.closed {
                return None;
            }
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    self.closed = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.fail(e);
                    return None;
                }
            }
            match line.trim().parse() {
                Ok(n) => return Some(n),
                Err(_) => self.say(format_args!("Please enter a number.\n")),
            }
        }
    }

    /// Reads a number in `min..=max`, asking again until one arrives.
    fn read_in_range(&mut self, min: u32, max: u32) -> Option<u32> {
        loop {
            let n = self.read_number()?;
            if (min..=max).contains(&n) {
                return Some(n);
            }
            self.say(format_args!("Please choose between {min} and {max}.\n"));
        }
    }

    /// Prints `items` as a 1-based menu and returns the chosen 0-based index.
    fn choose<T>(&mut self, items: &[T]) -> Option<usize>
    where
        T: fmt::Display,
    {
        for (i, item) in items.iter().enumerate() {
            self.say(format_args!("{}) {item}\n", i + 1));
        }
        let max = u32::try_from(items.len()).unwrap_or(u32::MAX);
        let n = self.read_in_range(1, max)?;
        usize::try_from(n - 1).ok()
    }
}

impl<R, W> DecisionPolicy for ConsolePolicy<R, W>
where
    R: BufRead,
    W: Write,
{
    fn decide_action(&mut self, _game: &Game<'_>, actions: &[Action]) -> Action {
        self.say(format_args!("\nWhat would you like to do?\n"));
        self.choose(actions)
            .map_or(Action::Retire, |index| actions[index])
    }

    fn decide_field_to_plant(&mut self, _game: &Game<'_>, fields: &[&Field]) -> usize {
        self.say(format_args!("Which field would you like to plant in?\n"));
        let items = fields
            .iter()
            .map(|field| {
                format!(
                    "{} (room for {}, soil quality {:.2})",
                    field.name, field.max_crop_quantity, field.soil_quality
                )
            })
            .collect::<Vec<_>>();
        self.choose(&items).unwrap_or(0)
    }

    fn decide_crop_to_plant(&mut self, _game: &Game<'_>, crops: &[&Arc<Crop>]) -> usize {
        self.say(format_args!("Which crop would you like to plant?\n"));
        let items = crops
            .iter()
            .map(|crop| {
                format!(
                    "{} (costs {}, sells for {})",
                    crop.name, crop.cost, crop.sale_price
                )
            })
            .collect::<Vec<_>>();
        self.choose(&items).unwrap_or(0)
    }

    fn decide_crop_quantity(
        &mut self,
        _game: &Game<'_>,
        _field: &Field,
        crop: &Crop,
        maximum: u32,
    ) -> u32 {
        self.say(format_args!(
            "How many {} would you like to plant? (0 - {maximum})\n",
            crop.name
        ));
        self.read_in_range(0, maximum).unwrap_or(0)
    }

    fn decide_field_to_buy(&mut self, _game: &Game<'_>, fields: &[&Field]) -> Option<usize> {
        self.say(format_args!("Which field would you like to buy?\n"));
        self.say(format_args!("0) None\n"));
        for (i, field) in fields.iter().enumerate() {
            self.say(format_args!(
                "{}) {} for {} (room for {}, soil quality {:.2})\n",
                i + 1,
                field.name,
                field.price,
                field.max_crop_quantity,
                field.soil_quality
            ));
        }
        let max = u32::try_from(fields.len()).unwrap_or(u32::MAX);
        match self.read_in_range(0, max)? {
            0 => None,
            n => usize::try_from(n - 1).ok(),
        }
    }
}
