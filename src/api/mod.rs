/*
 * Responsibility
 * - API version ごとの module 公開 (現在は v1 のみ)
 */
pub mod v1;
