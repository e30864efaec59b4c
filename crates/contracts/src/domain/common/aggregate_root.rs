use super::EntityMetadata;

/// Трейт для корня агрегата
///
/// Определяет обязательные методы и метаданные для всех агрегатов каталога
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id;

    // ============================================================================
    // Методы экземпляра (данные конкретной записи)
    // ============================================================================

    /// Получить ID записи
    fn id(&self) -> Self::Id;

    /// Получить метаданные жизненного цикла
    fn metadata(&self) -> &EntityMetadata;

    /// Получить изменяемые метаданные
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Метаданные класса агрегата (статические данные)
    // ============================================================================

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции (например, "category")
    fn collection_name() -> &'static str;

    /// Имя элемента для сообщений (единственное число, например, "Category")
    fn element_name() -> &'static str;

    /// Имя списка (множественное число, например, "Categories")
    fn list_name() -> &'static str;

    // ============================================================================
    // Методы с реализацией по умолчанию
    // ============================================================================

    /// Полное имя агрегата для системы (например, "a001_category")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Хук перед записью: обновляет updatedAt
    fn before_write(&mut self) {
        self.metadata_mut().touch();
    }
}
