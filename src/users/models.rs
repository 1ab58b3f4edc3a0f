use sqlx::FromRow;

/// Database model for the usuarios table
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct UserModel {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub password: String, // Argon2 PHC string, never sent to clients
}

/// Projection of a user row without the password hash
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct UserSummary {
    pub id: i64,
    pub nombre: String,
    pub email: String,
}

impl From<&UserModel> for UserSummary {
    fn from(user: &UserModel) -> Self {
        Self {
            id: user.id,
            nombre: user.nombre.clone(),
            email: user.email.clone(),
        }
    }
}

/// Values needed to insert a user; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nombre: String,
    pub email: String,
    pub password_hash: String,
}
