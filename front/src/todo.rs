use tally_api::v1::Todo;

/// One numbered row of the list.
pub fn view(position: usize, todo: &Todo) -> String {
    let check = if todo.completed { 'x' } else { ' ' };
    format!("{:>3}. [{}] {}", position, check, todo.title)
}

#[cfg(test)]
mod tests {
    use tally_api::v1::Title;

    use super::*;

    #[test]
    fn completed_todos_are_checked() {
        let mut todo = Todo::new(Title::parse("Buy milk").unwrap());
        assert_eq!(view(1, &todo), "  1. [ ] Buy milk");

        todo.completed = true;
        assert_eq!(view(12, &todo), " 12. [x] Buy milk");
    }
}
