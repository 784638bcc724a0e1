use terra_core::FieldType;

terra_core::model! {
    pub struct User("terra.models.user.User") {
        user_id: FieldType::Str,
        provider: FieldType::Str,
        reference_id: FieldType::Str,
        last_webhook_update: FieldType::Str,
        scopes: FieldType::Str,
    }
}
