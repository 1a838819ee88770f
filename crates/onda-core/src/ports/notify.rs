use async_trait::async_trait;

// El frontend implementará estos dos ports para cerrar el ciclo con el
// usuario: mensajes transitorios y re-fetch de la vista activa.

/// Superficie de notificaciones transitorias (estilo toast).
///
/// Fire-and-forget: no hay acuse de recibo ni posibilidad de fallo que le
/// importe al dominio.
#[async_trait]
pub trait Notifier: Send + Sync {
  async fn success(&self, message: &str);
  async fn error(&self, message: &str);
}

/// Señal para que la vista actual vuelva a pedir sus datos. Sin
/// parámetros, fire-and-forget.
#[async_trait]
pub trait RefreshSignal: Send + Sync {
  async fn refresh(&self);
}
