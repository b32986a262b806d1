//! Account Screen Forms
//!
//! Focus, editing and busy state for the login and signup screens. The core
//! owns validation; these types only track what the user has typed and
//! which field the cursor is in.

use ragchat_core::{LoginForm, PasswordStrength, SignupForm};

/// A field of an account form
pub trait FormField: Copy + PartialEq + 'static {
    /// Every field, in tab order
    const ALL: &'static [Self];

    /// Label drawn next to the input
    fn label(self) -> &'static str;

    /// Whether input is masked
    fn is_secret(self) -> bool;
}

/// Next (or previous) field in tab order, wrapping around
fn cycle<F: FormField>(current: F, forward: bool) -> F {
    let len = F::ALL.len();
    let idx = F::ALL.iter().position(|f| *f == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    F::ALL[next]
}

/// Login form fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginField {
    /// Account name
    Username,
    /// Password
    Password,
}

impl FormField for LoginField {
    const ALL: &'static [Self] = &[Self::Username, Self::Password];

    fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Password => "Password",
        }
    }

    fn is_secret(self) -> bool {
        matches!(self, Self::Password)
    }
}

/// Signup form fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupField {
    /// Requested account name
    Username,
    /// Contact address
    Email,
    /// Password
    Password,
    /// Password confirmation
    ConfirmPassword,
}

impl FormField for SignupField {
    const ALL: &'static [Self] = &[
        Self::Username,
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
        }
    }

    fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

/// Editing state shared by both account screens
#[derive(Clone, Debug)]
pub struct FormState<F: FormField, T> {
    /// Field values
    pub form: T,
    /// Field with the cursor
    pub focus: F,
    /// Error from the last attempt, cleared on the next one
    pub error: Option<String>,
    /// True while a request is outstanding
    pub busy: bool,
}

impl<F: FormField, T: Default> Default for FormState<F, T> {
    fn default() -> Self {
        Self {
            form: T::default(),
            focus: F::ALL[0],
            error: None,
            busy: false,
        }
    }
}

impl<F: FormField, T> FormState<F, T> {
    /// Move to the next field
    pub fn focus_next(&mut self) {
        self.focus = cycle(self.focus, true);
    }

    /// Move to the previous field
    pub fn focus_prev(&mut self) {
        self.focus = cycle(self.focus, false);
    }

    /// Whether the cursor is in the last field
    #[must_use]
    pub fn on_last_field(&self) -> bool {
        F::ALL.last() == Some(&self.focus)
    }

    /// Record the outcome of a finished request
    pub fn finish(&mut self, error: Option<String>) {
        self.busy = false;
        self.error = error;
    }
}

/// Login screen state
pub type LoginScreen = FormState<LoginField, LoginForm>;

/// Signup screen state
pub type SignupScreen = FormState<SignupField, SignupForm>;

impl LoginScreen {
    /// The focused field's value
    pub fn value_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.form.username,
            LoginField::Password => &mut self.form.password,
        }
    }

    /// A field's value
    #[must_use]
    pub fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Username => &self.form.username,
            LoginField::Password => &self.form.password,
        }
    }

    /// Type a character into the focused field
    pub fn insert(&mut self, c: char) {
        if !self.busy {
            self.value_mut().push(c);
            self.error = None;
        }
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self) {
        if !self.busy {
            self.value_mut().pop();
            self.error = None;
        }
    }

    /// Whether the submit action is enabled
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.busy && self.form.can_submit()
    }

    /// Mark busy and hand out the form to send, if submitting is allowed
    pub fn begin_submit(&mut self) -> Option<LoginForm> {
        if !self.can_submit() {
            return None;
        }
        self.busy = true;
        self.error = None;
        Some(self.form.clone())
    }
}

impl SignupScreen {
    /// The focused field's value
    pub fn value_mut(&mut self) -> &mut String {
        match self.focus {
            SignupField::Username => &mut self.form.username,
            SignupField::Email => &mut self.form.email,
            SignupField::Password => &mut self.form.password,
            SignupField::ConfirmPassword => &mut self.form.confirm_password,
        }
    }

    /// A field's value
    #[must_use]
    pub fn value(&self, field: SignupField) -> &str {
        match field {
            SignupField::Username => &self.form.username,
            SignupField::Email => &self.form.email,
            SignupField::Password => &self.form.password,
            SignupField::ConfirmPassword => &self.form.confirm_password,
        }
    }

    /// Type a character into the focused field
    pub fn insert(&mut self, c: char) {
        if !self.busy {
            self.value_mut().push(c);
            self.error = None;
        }
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self) {
        if !self.busy {
            self.value_mut().pop();
            self.error = None;
        }
    }

    /// Whether the submit action is enabled
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.busy && self.form.can_submit()
    }

    /// Strength meter reading for the password field
    #[must_use]
    pub fn strength(&self) -> Option<PasswordStrength> {
        self.form.strength()
    }

    /// Mark busy and hand out the form to send, if submitting is allowed
    pub fn begin_submit(&mut self) -> Option<SignupForm> {
        if !self.can_submit() {
            return None;
        }
        self.busy = true;
        self.error = None;
        Some(self.form.clone())
    }
}

/// Text drawn in an input box
#[must_use]
pub fn masked(value: &str, secret: bool) -> String {
    if secret {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    }
}
