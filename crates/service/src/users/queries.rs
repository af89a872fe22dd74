//! Fixed statements for the `users` table, one set per placeholder style.

use sea_orm::DatabaseBackend;

pub struct Queries {
    pub insert_user: &'static str,
    pub get_users: &'static str,
    pub get_user_by_id: &'static str,
    pub update_user: &'static str,
    pub delete_user: &'static str,
}

static POSTGRES: Queries = Queries {
    insert_user: "INSERT INTO users (id, name, age) VALUES ($1, $2, $3)",
    get_users: "SELECT id, name, age FROM users",
    get_user_by_id: "SELECT id, name, age FROM users WHERE id = $1",
    update_user: "UPDATE users SET name = $1, age = $2 WHERE id = $3",
    delete_user: "DELETE FROM users WHERE id = $1",
};

static QUESTION_MARK: Queries = Queries {
    insert_user: "INSERT INTO users (id, name, age) VALUES (?, ?, ?)",
    get_users: "SELECT id, name, age FROM users",
    get_user_by_id: "SELECT id, name, age FROM users WHERE id = ?",
    update_user: "UPDATE users SET name = ?, age = ? WHERE id = ?",
    delete_user: "DELETE FROM users WHERE id = ?",
};

pub fn for_backend(backend: DatabaseBackend) -> &'static Queries {
    match backend {
        DatabaseBackend::Postgres => &POSTGRES,
        _ => &QUESTION_MARK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgres_uses_numbered_placeholders() {
        let q = for_backend(DatabaseBackend::Postgres);
        assert!(q.update_user.contains("$3"));
        assert!(!q.update_user.contains('?'));
    }

    #[test]
    fn sqlite_uses_question_marks() {
        let q = for_backend(DatabaseBackend::Sqlite);
        assert_eq!(q.insert_user.matches('?').count(), 3);
        assert_eq!(q.delete_user.matches('?').count(), 1);
    }
}
