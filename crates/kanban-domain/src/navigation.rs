/// View the board returns to when the user leaves it.
pub const HOME_VIEW: &str = "home";

/// Receives requests to leave the board for another view.
pub trait Navigator {
    fn navigate(&mut self, view: &str);
}

impl<F> Navigator for F
where
    F: FnMut(&str),
{
    fn navigate(&mut self, view: &str) {
        self(view)
    }
}
