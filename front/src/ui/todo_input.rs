use crate::Data;

const PLACEHOLDER: &str = "Add a new todo...";

pub fn view(data: &Data) -> String {
    let draft = match data.draft.is_empty() {
        true => PLACEHOLDER,
        false => data.draft.as_str(),
    };

    let label = if data.loading { "..." } else { "Add" };

    match data.can_submit() {
        true => format!("> {}  [{}]", draft, label),
        false => format!("> {}  ({})", draft, label),
    }
}
