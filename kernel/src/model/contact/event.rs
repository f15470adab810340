pub struct CreateContact {
    pub name: String,
    pub email: String,
    pub message: String,
}
