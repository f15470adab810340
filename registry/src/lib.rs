use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::gateway::{mail::MailNotifierImpl, payment::CheckoutGatewayImpl};
use adapter::redis::RedisClient;
use adapter::repository::{
    auth::AuthRepositoryImpl, booking::BookingRepositoryImpl, contact::ContactRepositoryImpl,
    health::HealthCheckRepositoryImpl, room::RoomRepositoryImpl, user::UserRepositoryImpl,
};
use kernel::gateway::{notifier::BookingNotifier, payment::PaymentGateway};
use kernel::repository::{
    auth::AuthRepository, booking::BookingRepository, contact::ContactRepository,
    health::HealthCheckRepository, room::RoomRepository, user::UserRepository,
};
use shared::{config::AppConfig, error::AppResult};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    room_repository: Arc<dyn RoomRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    contact_repository: Arc<dyn ContactRepository>,
    payment_gateway: Arc<dyn PaymentGateway>,
    booking_notifier: Arc<dyn BookingNotifier>,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        redis_client: Arc<RedisClient>,
        app_config: AppConfig,
    ) -> AppResult<Self> {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let room_repository = Arc::new(RoomRepositoryImpl::new(pool.clone()));
        let booking_repository = Arc::new(BookingRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let contact_repository = Arc::new(ContactRepositoryImpl::new(pool.clone()));
        let payment_gateway = Arc::new(CheckoutGatewayImpl::new(app_config.payment.clone())?);
        let booking_notifier = Arc::new(MailNotifierImpl::new(app_config.mail.clone())?);
        Ok(Self {
            health_check_repository,
            room_repository,
            booking_repository,
            user_repository,
            auth_repository,
            contact_repository,
            payment_gateway,
            booking_notifier,
        })
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn room_repository(&self) -> Arc<dyn RoomRepository> {
        self.room_repository.clone()
    }

    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn contact_repository(&self) -> Arc<dyn ContactRepository> {
        self.contact_repository.clone()
    }

    pub fn payment_gateway(&self) -> Arc<dyn PaymentGateway> {
        self.payment_gateway.clone()
    }

    pub fn booking_notifier(&self) -> Arc<dyn BookingNotifier> {
        self.booking_notifier.clone()
    }
}
