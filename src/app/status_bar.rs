/// Key hints shown in the bottom bar, refreshed after every key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBarState {
    pub left_hint: String,
    pub right_hint: String,
}

impl StatusBarState {
    fn new(left: &str, right: &str) -> Self {
        Self {
            left_hint: left.to_string(),
            right_hint: right.to_string(),
        }
    }

    /// Host page with the wizard closed
    pub fn host() -> Self {
        Self::new("j/k: buckets", "Enter: load data  o: open  :help")
    }

    pub fn select_step() -> Self {
        Self::new("j/k: navigate  Space: toggle", "Enter: pick bucket  >: next  Esc: close")
    }

    pub fn configure_step() -> Self {
        Self::new("j/k: fields  [/]: plugin  i: edit", "d: remove  s: save  </>: step")
    }

    pub fn verify_step() -> Self {
        Self::new("[/]: plugin", "Enter: finish  <: back  Esc: close")
    }

    pub fn empty_step() -> Self {
        Self::new("Nothing to show for this step", ":step 0  Esc: close")
    }

    pub fn editing() -> Self {
        Self::new("Type a value", "Enter: save  Esc: cancel")
    }

    pub fn command_mode() -> Self {
        Self::new("", "Enter: run  Esc: cancel")
    }

    pub fn view_failed() -> Self {
        Self::new("The wizard hit an error", "Esc: close")
    }
}
