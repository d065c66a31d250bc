//! Operation to role policy table

use crate::{
    error::AppError,
    models::user::{Principal, Role},
};

/// Every operation that sits behind the access gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AddBook,
    LibrarianDashboard,
    UpdateBook,
    DeleteBook,
    AddMember,
    UpdateMember,
    DeleteMember,
    MemberDashboard,
    BorrowBook,
    ReturnBook,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::AddBook,
        Operation::LibrarianDashboard,
        Operation::UpdateBook,
        Operation::DeleteBook,
        Operation::AddMember,
        Operation::UpdateMember,
        Operation::DeleteMember,
        Operation::MemberDashboard,
        Operation::BorrowBook,
        Operation::ReturnBook,
    ];

    /// Role the caller must hold; `None` admits any authenticated principal
    pub fn required_role(self) -> Option<Role> {
        match self {
            Operation::AddBook
            | Operation::LibrarianDashboard
            | Operation::UpdateBook
            | Operation::DeleteBook
            | Operation::AddMember
            | Operation::UpdateMember => Some(Role::Librarian),
            // Any authenticated caller may delete a user record.
            Operation::DeleteMember => None,
            Operation::MemberDashboard | Operation::BorrowBook | Operation::ReturnBook => {
                Some(Role::Member)
            }
        }
    }
}

impl Principal {
    /// Check this principal against the policy for `operation`
    pub fn authorize(&self, operation: Operation) -> Result<(), AppError> {
        match operation.required_role() {
            Some(required) if required != self.role => {
                tracing::debug!(
                    username = %self.username,
                    role = %self.role,
                    ?operation,
                    "Role mismatch"
                );
                Err(AppError::wrong_role(self.role))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal {
            username: "someone".to_string(),
            role,
        }
    }

    #[test]
    fn test_mismatched_role_is_always_forbidden() {
        for operation in Operation::ALL {
            let Some(required) = operation.required_role() else {
                continue;
            };
            let other = match required {
                Role::Librarian => Role::Member,
                Role::Member => Role::Librarian,
            };

            assert!(principal(required).authorize(operation).is_ok());
            match principal(other).authorize(operation) {
                Err(AppError::Authorization { role, .. }) => assert_eq!(role, Some(other)),
                result => panic!("{:?} with {} gave {:?}", operation, other, result),
            }
        }
    }

    #[test]
    fn test_delete_member_open_to_any_role() {
        assert!(principal(Role::Librarian).authorize(Operation::DeleteMember).is_ok());
        assert!(principal(Role::Member).authorize(Operation::DeleteMember).is_ok());
    }

    #[test]
    fn test_circulation_is_member_only() {
        assert_eq!(Operation::BorrowBook.required_role(), Some(Role::Member));
        assert_eq!(Operation::ReturnBook.required_role(), Some(Role::Member));
        assert_eq!(Operation::AddBook.required_role(), Some(Role::Librarian));
    }
}
