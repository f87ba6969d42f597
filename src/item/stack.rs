use super::definition::Item;

/// One occupied inventory position
///
/// Slots are value records: the inventory replaces the record at an index
/// rather than mutating it through a shared reference. A slot always holds
/// between 1 and `item.max_stack()` units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    item: Item,
    quantity: u32,
}

impl Slot {
    pub(crate) fn new(item: Item, quantity: u32) -> Self {
        debug_assert!(quantity >= 1 && quantity <= item.max_stack());
        Slot { item, quantity }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Units that can still be added before the slot is full
    pub fn space(&self) -> u32 {
        self.item.max_stack().saturating_sub(self.quantity)
    }

    pub fn is_full(&self) -> bool {
        self.space() == 0
    }

    /// Adds up to `amount` units
    ///
    /// Returns the updated record and how many units didn't fit (overflow).
    pub(crate) fn with_added(&self, amount: u32) -> (Slot, u32) {
        let adding = amount.min(self.space());
        let updated = Slot {
            item: self.item.clone(),
            quantity: self.quantity + adding,
        };
        (updated, amount - adding)
    }

    /// Takes up to `amount` units
    ///
    /// Returns the remaining record (`None` once emptied) and how many units
    /// were actually taken.
    pub(crate) fn with_taken(&self, amount: u32) -> (Option<Slot>, u32) {
        let taken = amount.min(self.quantity);
        let left = self.quantity - taken;
        let rest = (left > 0).then(|| Slot {
            item: self.item.clone(),
            quantity: left,
        });
        (rest, taken)
    }
}
