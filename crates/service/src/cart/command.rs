use models::{LineItem, Product};

/// A cart mutation, applied against a snapshot to produce the next list.
#[derive(Clone, Debug, PartialEq)]
pub enum CartCommand {
    Add(Product),
    Increment(String),
    Decrement(String),
}

impl CartCommand {
    /// Catalog id the command targets.
    pub fn id(&self) -> &str {
        match self {
            CartCommand::Add(product) => &product.id,
            CartCommand::Increment(id) | CartCommand::Decrement(id) => id,
        }
    }

    /// Compute the list that results from this command, or `None` when the
    /// command leaves the cart untouched (increment/decrement of an absent id).
    pub fn apply(self, current: &[LineItem]) -> Option<Vec<LineItem>> {
        let position = current.iter().position(|item| item.id == self.id());
        let mut next = current.to_vec();
        match (self, position) {
            (CartCommand::Add(_), Some(i)) | (CartCommand::Increment(_), Some(i)) => {
                next[i].quantity = next[i].quantity.saturating_add(1);
            }
            (CartCommand::Add(product), None) => next.push(LineItem::from_product(product)),
            (CartCommand::Decrement(_), Some(i)) if next[i].quantity > 1 => next[i].quantity -= 1,
            (CartCommand::Decrement(_), Some(i)) => {
                next.remove(i);
            }
            (CartCommand::Increment(_), None) | (CartCommand::Decrement(_), None) => return None,
        }
        Some(next)
    }
}
