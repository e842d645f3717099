use chrono::NaiveDate;
use engine::{CATEGORIES, Currency, PAYMENT_METHODS, RawExpense, format_date};

/// Form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Amount,
    Currency,
    Category,
    PaymentMethod,
    Date,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Amount,
        Field::Currency,
        Field::Category,
        Field::PaymentMethod,
        Field::Date,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Amount => "Amount",
            Self::Currency => "Currency",
            Self::Category => "Category",
            Self::PaymentMethod => "Payment Method",
            Self::Date => "Date",
        }
    }

    /// Free text fields; the others are selectors.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Amount | Self::Date)
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Contents of the "add expense" form.
#[derive(Debug)]
pub struct FormState {
    pub amount: String,
    pub date: String,
    pub focus: Field,
    currency: usize,
    category: usize,
    payment_method: usize,
}

impl FormState {
    /// Empty amount, first option of every selector, date set to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            amount: String::new(),
            date: format_date(today),
            focus: Field::Amount,
            currency: 0,
            category: 0,
            payment_method: 0,
        }
    }

    pub fn currency(&self) -> Currency {
        Currency::ALL[self.currency]
    }

    pub fn category(&self) -> &'static str {
        CATEGORIES[self.category]
    }

    pub fn payment_method(&self) -> &'static str {
        PAYMENT_METHODS[self.payment_method]
    }

    /// Display value of a field.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Amount => &self.amount,
            Field::Currency => self.currency().code(),
            Field::Category => self.category(),
            Field::PaymentMethod => self.payment_method(),
            Field::Date => &self.date,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Types into the focused text field. Ignored on selectors.
    pub fn input(&mut self, ch: char) {
        match self.focus {
            Field::Amount => self.amount.push(ch),
            Field::Date => self.date.push(ch),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Field::Amount => {
                self.amount.pop();
            }
            Field::Date => {
                self.date.pop();
            }
            _ => {}
        }
    }

    /// Moves the focused selector to the next (or previous) option, wrapping around.
    pub fn cycle(&mut self, forward: bool) {
        let (index, len) = match self.focus {
            Field::Currency => (&mut self.currency, Currency::ALL.len()),
            Field::Category => (&mut self.category, CATEGORIES.len()),
            Field::PaymentMethod => (&mut self.payment_method, PAYMENT_METHODS.len()),
            Field::Amount | Field::Date => return,
        };
        *index = if forward {
            (*index + 1) % len
        } else {
            (*index + len - 1) % len
        };
    }

    pub fn to_raw(&self) -> RawExpense {
        RawExpense {
            amount: self.amount.clone(),
            currency: self.currency(),
            category: self.category().to_string(),
            payment_method: self.payment_method().to_string(),
            date: self.date.clone(),
        }
    }

    /// Resets the amount after a successful add and moves focus back to it.
    pub fn clear_amount(&mut self) {
        self.amount.clear();
        self.focus = Field::Amount;
    }
}
