//! Position tracking inside structured content
//!
//! A cursor is an `index` into a list of items plus a `sub_index` for the
//! steps inside the current item (repetitions of an invocation, lines of a
//! litany section). What counts as a step is decided by a [`StepRange`].

/// Describes the sub-steps of every item a cursor can point at.
pub trait StepRange {
    fn item_count(&self) -> usize;

    /// First sub-step value of the item at `index`.
    fn first_step(&self, index: usize) -> usize;

    /// Last sub-step value of the item at `index`.
    fn last_step(&self, index: usize) -> usize;
}

/// Items without inner steps, e.g. verses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlatSteps(pub usize);

impl StepRange for FlatSteps {
    fn item_count(&self) -> usize {
        self.0
    }

    fn first_step(&self, _index: usize) -> usize {
        0
    }

    fn last_step(&self, _index: usize) -> usize {
        0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationCursor {
    pub index: usize,
    pub sub_index: usize,
}

impl NavigationCursor {
    /// Cursor on the first step of the first item.
    pub fn start<S: StepRange + ?Sized>(steps: &S) -> Self {
        Self::at(0, steps)
    }

    /// Cursor on the first step of `index`, clamped to the item range.
    pub fn at<S: StepRange + ?Sized>(index: usize, steps: &S) -> Self {
        let index = index.min(steps.item_count().saturating_sub(1));
        Self {
            index,
            sub_index: steps.first_step(index),
        }
    }

    pub fn advance<S: StepRange + ?Sized>(self, steps: &S) -> Self {
        if steps.item_count() == 0 {
            return self;
        }
        if self.sub_index < steps.last_step(self.index) {
            return Self {
                sub_index: self.sub_index + 1,
                ..self
            };
        }
        if self.index + 1 < steps.item_count() {
            let index = self.index + 1;
            return Self {
                index,
                sub_index: steps.first_step(index),
            };
        }
        self
    }

    /// Step back. Crossing into the previous item lands on its last step.
    pub fn retreat<S: StepRange + ?Sized>(self, steps: &S) -> Self {
        if steps.item_count() == 0 {
            return self;
        }
        if self.sub_index > steps.first_step(self.index) {
            return Self {
                sub_index: self.sub_index - 1,
                ..self
            };
        }
        if self.index > 0 {
            let index = self.index - 1;
            return Self {
                index,
                sub_index: steps.last_step(index),
            };
        }
        self
    }

    pub fn is_at_end<S: StepRange + ?Sized>(self, steps: &S) -> bool {
        steps.item_count() == 0
            || (self.index + 1 >= steps.item_count() && self.sub_index >= steps.last_step(self.index))
    }

    pub fn is_at_start<S: StepRange + ?Sized>(self, steps: &S) -> bool {
        steps.item_count() == 0 || (self.index == 0 && self.sub_index <= steps.first_step(0))
    }
}
