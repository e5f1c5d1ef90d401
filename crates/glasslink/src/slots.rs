use crate::import::LinkTextures;
use crate::record::SLOT_COUNT;

/// Round-robin cursor guessing which producer slot is freshest.
///
/// The fence primitive only exposes a wait, not the last-signalled value, so
/// the consumer cannot know which of the three rotating buffers the producer
/// finished most recently; stepping one slot per frame is the available
/// approximation.
#[derive(Debug, Default)]
pub struct SlotCursor {
    index: usize,
}

impl SlotCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index for this frame; the cursor then steps to the next slot. Called
    /// exactly once per frame, whether or not an import happened.
    pub fn advance(&mut self) -> usize {
        let index = self.index;
        self.index = (self.index + 1) % SLOT_COUNT;
        index
    }

    /// Advances and pairs the index with the texture currently owned there.
    /// The returned texture must still be fence-waited before sampling.
    pub fn advance_and_get<'a, T>(
        &mut self,
        textures: &'a LinkTextures<T>,
    ) -> (usize, Option<&'a T>) {
        let index = self.advance();
        (index, textures.slot(index))
    }
}
