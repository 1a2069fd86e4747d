pub mod domain;
pub mod memory;
pub mod ports;
pub mod repositories;

pub use domain::{
    Appointment, AppointmentUpdate, Client, ClientUpdate, InboxSnapshot, Message, NewAppointment,
    NewClient, NewMessage, NewUser, PublicUser, User, UserUpdate,
};
pub use memory::MemoryStore;
pub use ports::{Mailer, PortError, PortResult, RecordStore, SmsGateway, SmsReceipt};
pub use repositories::{
    AppointmentRepository, ClientRepository, MessageRepository, UserRepository,
};
