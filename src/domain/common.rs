/// Supplies a one-line label for terminal listings and logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
