use crate::types::NotificationPayload;

/// Where planned notification effects land: showing a notification and
/// opening the app window.
pub trait NotificationDisplay: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;
    type ShowFut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;
    type OpenFut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;

    fn show<'a>(&'a self, payload: &'a NotificationPayload) -> Self::ShowFut<'a>;

    fn open_window<'a>(&'a self, url: &'a str) -> Self::OpenFut<'a>;
}
