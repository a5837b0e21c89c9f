use crate::api::types::PieceId;
use crate::components::piece::Piece;

/// Simple piece storage using a flat Vec.
/// Designed for small piece counts (dozens, not thousands).
pub struct PieceBoard {
    pieces: Vec<Piece>,
}

impl PieceBoard {
    pub fn new() -> Self {
        Self {
            pieces: Vec::with_capacity(32),
        }
    }

    /// Add a piece to the board.
    pub fn spawn(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    /// Get a reference to a piece by ID.
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Get a mutable reference to a piece by ID.
    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    /// Iterate over all pieces.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Iterate over all pieces mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.pieces.iter_mut()
    }

    /// Find the first piece with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.name == name)
    }

    /// Number of pieces on the board.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether the board is empty.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Count pieces currently locked into their targets.
    pub fn count_snapped(&self) -> usize {
        self.pieces.iter().filter(|p| p.snapped).count()
    }
}

impl Default for PieceBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pose::Pose;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut board = PieceBoard::new();
        let id = PieceId(1);
        board.spawn(Piece::new(id).with_pose(Pose::from_position(Vec3::new(1.0, 2.0, 3.0))));
        let p = board.get(id).unwrap();
        assert_eq!(p.pose.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut board = PieceBoard::new();
        let id = PieceId(1);
        board.spawn(Piece::new(id));
        board.get_mut(id).unwrap().snapped = true;
        assert!(board.get(id).unwrap().snapped);
    }

    #[test]
    fn find_by_name() {
        let mut board = PieceBoard::new();
        board.spawn(Piece::new(PieceId(1)).with_name("apex"));
        board.spawn(Piece::new(PieceId(2)).with_name("base"));
        let apex = board.find_by_name("apex").unwrap();
        assert_eq!(apex.id, PieceId(1));
    }

    #[test]
    fn count_snapped_tracks_flags() {
        let mut board = PieceBoard::new();
        board.spawn(Piece::new(PieceId(1)));
        board.spawn(Piece::new(PieceId(2)));
        assert_eq!(board.count_snapped(), 0);
        board.get_mut(PieceId(2)).unwrap().snapped = true;
        assert_eq!(board.count_snapped(), 1);
    }
}
