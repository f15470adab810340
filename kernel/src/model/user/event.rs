use crate::model::id::UserId;

pub struct CreateUser {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

pub struct DeleteUser {
    pub user_id: UserId,
}
