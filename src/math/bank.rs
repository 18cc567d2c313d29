use super::matrix::Matrix4;
use crate::error::{KinematicsError, Result};

/// Fixed set of matrices addressed by slot, laid out contiguously so the
/// whole bank can be copied into a uniform buffer in one call.
///
/// Slots are the one place where a destination can name the same storage as
/// its source, so the aliasing rules live here: [`compose`](Self::compose)
/// snapshots its operands and accepts `dst` equal to either of them, while
/// [`set_inverse_of`](Self::set_inverse_of) rejects `dst == src`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixBank {
    slots: Vec<Matrix4>,
}

impl MatrixBank {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![Matrix4::IDENTITY; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Matrix4] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Result<&Matrix4> {
        let len = self.slots.len();
        self.slots
            .get(slot)
            .ok_or(KinematicsError::SlotOutOfRange { slot, len })
    }

    pub fn get_mut(&mut self, slot: usize) -> Result<&mut Matrix4> {
        let len = self.slots.len();
        self.slots
            .get_mut(slot)
            .ok_or(KinematicsError::SlotOutOfRange { slot, len })
    }

    /// `bank[dst] = bank[lhs] * bank[rhs]`.
    pub fn compose(&mut self, dst: usize, lhs: usize, rhs: usize) -> Result<&mut Matrix4> {
        let product = *self.get(lhs)? * *self.get(rhs)?;
        let out = self.get_mut(dst)?;
        *out = product;
        Ok(out)
    }

    /// `bank[dst] = bank[src]^-1`; use [`Matrix4::invert`] to invert a slot in place.
    pub fn set_inverse_of(&mut self, dst: usize, src: usize) -> Result<&mut Matrix4> {
        let source = *self.get(src)?;
        if dst == src {
            return Err(KinematicsError::AliasedOperand);
        }
        let out = self.get_mut(dst)?;
        out.set_inverse_of(&source)?;
        Ok(out)
    }

    /// `bank[dst] = (bank[src]^-1)^T`, the matrix that carries surface normals.
    pub fn normal_matrix(&mut self, dst: usize, src: usize) -> Result<&mut Matrix4> {
        let out = self.set_inverse_of(dst, src)?;
        out.transpose();
        Ok(out)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_into_same_slot_is_aliasing() {
        let mut bank = MatrixBank::new(2);
        *bank.get_mut(0).unwrap() = Matrix4::translation_of(1.0, 2.0, 3.0);
        assert_eq!(
            bank.set_inverse_of(0, 0).unwrap_err(),
            KinematicsError::AliasedOperand
        );
        assert_eq!(*bank.get(0).unwrap(), Matrix4::translation_of(1.0, 2.0, 3.0));

        bank.set_inverse_of(1, 0).unwrap();
        assert_eq!(*bank.get(1).unwrap(), Matrix4::translation_of(-1.0, -2.0, -3.0));
    }

    #[test]
    fn out_of_range_slot_wins_over_aliasing() {
        let mut bank = MatrixBank::new(2);
        assert_eq!(
            bank.set_inverse_of(9, 9).unwrap_err(),
            KinematicsError::SlotOutOfRange { slot: 9, len: 2 }
        );
        assert_eq!(
            bank.set_inverse_of(5, 0).unwrap_err(),
            KinematicsError::SlotOutOfRange { slot: 5, len: 2 }
        );
        assert_eq!(
            bank.normal_matrix(1, 1).unwrap_err(),
            KinematicsError::AliasedOperand
        );
    }

    #[test]
    fn compose_tolerates_destination_operand() {
        let mut bank = MatrixBank::new(2);
        let a = Matrix4::rotation_of(30.0, 0.0, 0.0, 1.0);
        *bank.get_mut(0).unwrap() = a;
        *bank.get_mut(1).unwrap() = Matrix4::translation_of(1.0, 0.0, 0.0);

        bank.compose(0, 0, 0).unwrap();
        assert!(bank.get(0).unwrap().abs_diff_eq(&(a * a), 1e-6));

        bank.compose(1, 0, 1).unwrap();
        let expected = a * a * Matrix4::translation_of(1.0, 0.0, 0.0);
        assert!(bank.get(1).unwrap().abs_diff_eq(&expected, 1e-6));
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let mut bank = MatrixBank::new(2);
        bank.get_mut(0).unwrap().set_scale(2.0, 4.0, 0.5);
        let n = *bank.normal_matrix(1, 0).unwrap();
        assert_eq!(n.entries[0], 0.5);
        assert_eq!(n.entries[5], 0.25);
        assert_eq!(n.entries[10], 2.0);
    }

    #[test]
    fn out_of_range_slot() {
        let mut bank = MatrixBank::new(3);
        assert_eq!(
            bank.compose(3, 0, 1).unwrap_err(),
            KinematicsError::SlotOutOfRange { slot: 3, len: 3 }
        );
        assert_eq!(bank.as_bytes().len(), 3 * 64);
    }
}
